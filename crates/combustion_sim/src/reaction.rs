//! Stepped, stochastic reaction model
//!
//! A propane molecule burns by collecting oxygen one encounter at a time. Each
//! accepted encounter consumes one oxygen and arms the propane a bit further;
//! at the threshold the propane is replaced by its products. A propane that
//! stalls for longer than the armed window cools down and loses its progress.

use combustion_math::{PlayField, Vec2};

use crate::particle::Particle;
use crate::population::Population;
use crate::rng::SimRng;
use crate::species::Species;

/// Acceptance probability at zero temperature, before the base factor
const ACTIVATION_OFFSET: f32 = 0.60;
/// Acceptance probability gained per unit of temperature, before the base factor
const ACTIVATION_SLOPE: f32 = 0.22;

/// Oxygen encounters that convert one propane
pub const THRESHOLD: u32 = 5;
/// CO2 molecules produced per converted propane
pub const CO2_YIELD: usize = 3;
/// H2O molecules produced per converted propane
pub const H2O_YIELD: usize = 4;

/// Tunable constants of the reaction model
///
/// The stoichiometry itself is fixed: see [`THRESHOLD`], [`CO2_YIELD`] and
/// [`H2O_YIELD`].
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionParams {
    /// Distance below which a propane/oxygen pair can react
    pub capture_radius: f32,
    /// Base factor of the acceptance probability
    pub base_probability: f32,
    /// Upper bound on the acceptance probability
    pub probability_cap: f32,
    /// Seconds an armed propane may wait for its next encounter
    pub armed_window: f32,
    /// Maximum product offset from the converted propane, per axis
    pub product_jitter: f32,
}

impl Default for ReactionParams {
    fn default() -> Self {
        Self {
            // Three molecule radii of 14 units
            capture_radius: 42.0,
            base_probability: 0.78,
            probability_cap: 0.98,
            armed_window: 1.2,
            product_jitter: 20.0,
        }
    }
}

impl ReactionParams {
    /// Replace unusable values so the model always runs
    ///
    /// Non-finite numbers fall back to the defaults, negatives become zero and
    /// the cap is limited to [0, 1].
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32| if value.is_finite() { value.max(0.0) } else { fallback };

        self.capture_radius = fix(self.capture_radius, defaults.capture_radius);
        self.base_probability = fix(self.base_probability, defaults.base_probability);
        self.probability_cap = fix(self.probability_cap, defaults.probability_cap).min(1.0);
        self.armed_window = fix(self.armed_window, defaults.armed_window);
        self.product_jitter = fix(self.product_jitter, defaults.product_jitter);
        self
    }
}

/// Probability that one encounter is accepted at the given temperature
///
/// `min(cap, base * (0.60 + 0.22 * temperature))`, never negative.
pub fn acceptance_probability(temperature: f32, params: &ReactionParams) -> f32 {
    let temperature = if temperature.is_finite() { temperature } else { 0.0 };
    let p = params.base_probability * (ACTIVATION_OFFSET + ACTIVATION_SLOPE * temperature);
    p.min(params.probability_cap).max(0.0)
}

/// What happened during one evaluation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Propane that found an oxygen inside the capture radius
    pub encounters: usize,
    /// Encounters that passed the probability draw
    pub accepted: usize,
    /// Oxygen removed
    pub oxygen_consumed: usize,
    /// Propane that reached the threshold and turned into products
    pub conversions: usize,
    /// Armed propane that cooled down and lost their progress
    pub decayed: usize,
}

impl PassReport {
    /// Whether anything changed the population or armed state
    pub fn is_quiet(&self) -> bool {
        self.accepted == 0 && self.decayed == 0
    }
}

/// Run one evaluation pass over the reactant collections
///
/// 1. Armed propane age by `dt` and disarm once past the armed window.
/// 2. Propane are visited from the highest index down. Each looks for the first
///    oxygen (also from the highest index down) strictly inside the capture
///    radius.
/// 3. A candidate is accepted with [`acceptance_probability`]. Rejection has no
///    effect.
/// 4. Acceptance removes the oxygen at once, so no later propane in this pass
///    can match it, and arms the propane.
/// 5. At the threshold the propane is removed and its products are appended
///    around its position.
pub fn evaluate<R: SimRng + ?Sized>(
    population: &mut Population,
    dt: f32,
    temperature: f32,
    params: &ReactionParams,
    field: &PlayField,
    rng: &mut R,
) -> PassReport {
    let mut report = PassReport::default();
    let probability = acceptance_probability(temperature, params);
    let radius_sq = params.capture_radius * params.capture_radius;
    let mut converted_at: Vec<Vec2> = Vec::new();

    {
        let (propane, oxygen) = population.reactants_mut();

        for molecule in propane.iter_mut().filter(|m| m.is_armed()) {
            molecule.armed_elapsed += dt;
            if molecule.armed_elapsed > params.armed_window {
                molecule.disarm();
                report.decayed += 1;
            }
        }

        // Reverse index order keeps removal by index valid for the rest of the scan
        for i in (0..propane.len()).rev() {
            let center = propane[i].position;
            let Some(j) = (0..oxygen.len())
                .rev()
                .find(|&j| oxygen[j].position.distance_squared(center) < radius_sq)
            else {
                continue;
            };

            report.encounters += 1;
            if !rng.check_probability(probability) {
                continue;
            }
            report.accepted += 1;

            oxygen.remove(j);
            report.oxygen_consumed += 1;

            let molecule = &mut propane[i];
            molecule.armed_count += 1;
            molecule.armed_elapsed = 0.0;

            if molecule.armed_count >= THRESHOLD {
                let burned = propane.remove(i);
                converted_at.push(burned.position);
                report.conversions += 1;
            }
        }
    }

    for origin in converted_at {
        spawn_products(population, origin, params, field, rng);
    }

    if report.conversions > 0 {
        log::debug!(
            "Reaction pass: {} accepted, {} propane converted",
            report.accepted,
            report.conversions
        );
    }

    report
}

fn spawn_products<R: SimRng + ?Sized>(
    population: &mut Population,
    origin: Vec2,
    params: &ReactionParams,
    field: &PlayField,
    rng: &mut R,
) {
    let yields = [
        (Species::CarbonDioxide, CO2_YIELD),
        (Species::Water, H2O_YIELD),
    ];
    for (species, count) in yields {
        for _ in 0..count {
            population.push(Particle::spawn_near(species, origin, params.product_jitter, field, rng));
        }
    }
}
