//! Particle records, one per simulated molecule

use combustion_math::{PlayField, Vec2};

use crate::rng::SimRng;
use crate::species::Species;

/// Half-width of the uniform range each fresh velocity component is drawn from
pub const DEFAULT_VELOCITY_RANGE: f32 = 60.0;

/// A molecule with position, velocity and reaction progress
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    species: Species,
    /// Position in canvas units
    pub position: Vec2,
    /// Velocity in canvas units per second (before the temperature multiplier)
    pub velocity: Vec2,
    /// Accepted oxygen encounters toward this propane's conversion
    pub armed_count: u32,
    /// Seconds since `armed_count` last increased
    pub armed_elapsed: f32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(species: Species, position: Vec2) -> Self {
        Self {
            species,
            position,
            velocity: Vec2::ZERO,
            armed_count: 0,
            armed_elapsed: 0.0,
        }
    }

    /// Create a particle at a uniform random point of `area` with a random velocity
    pub fn spawn_in<R: SimRng + ?Sized>(species: Species, area: &PlayField, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.gen_range_f32(area.min.x, area.max.x),
            rng.gen_range_f32(area.min.y, area.max.y),
        );
        Self::new(species, position).with_velocity(random_velocity(rng))
    }

    /// Create a particle near `origin`, offset by up to `jitter` on each axis
    ///
    /// The result is clamped into `field`.
    pub fn spawn_near<R: SimRng + ?Sized>(
        species: Species,
        origin: Vec2,
        jitter: f32,
        field: &PlayField,
        rng: &mut R,
    ) -> Self {
        let offset = Vec2::new(rng.gen_signed(jitter), rng.gen_signed(jitter));
        let position = field.clamp_point(origin + offset);
        Self::new(species, position).with_velocity(random_velocity(rng))
    }

    /// Set the velocity of this particle
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Species, fixed at creation
    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Whether this propane has a partial reaction in progress
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed_count > 0
    }

    /// Drop any partial reaction progress
    pub fn disarm(&mut self) {
        self.armed_count = 0;
        self.armed_elapsed = 0.0;
    }
}

fn random_velocity<R: SimRng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.gen_signed(DEFAULT_VELOCITY_RANGE),
        rng.gen_signed(DEFAULT_VELOCITY_RANGE),
    )
}
