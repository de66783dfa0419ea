//! Simulation context
//!
//! [`Simulation`] owns everything one running simulation needs: the population,
//! the parameters, the play field, the random source and the pause and label
//! flags. Lifecycle: `new -> reset(params) -> tick(dt) -> population()`.
//! Several instances can run side by side.

use combustion_math::PlayField;
use rand::SeedableRng;

use crate::integrator::{integrate, speed_multiplier, DEFAULT_SPEED_SCALE};
use crate::particle::Particle;
use crate::population::{Population, Tally};
use crate::reaction::{evaluate, PassReport, ReactionParams};
use crate::rng::{DefaultRng, SimRng};
use crate::species::Species;

/// Largest time step a single tick may take, in seconds
pub const DEFAULT_MAX_DT: f32 = 0.033;

/// Extra clearance between the seeding area and the bottom wall
const SEED_BOTTOM_CLEARANCE: f32 = 60.0;

/// User-facing parameters of a run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    /// Drives both motion speed and acceptance probability
    pub temperature: f32,
    /// Propane seeded on reset
    pub propane_count: usize,
    /// Oxygen seeded on reset
    pub oxygen_count: usize,
    /// Constant in `multiplier = temperature^2 * speed_scale`
    pub speed_scale: f32,
    /// Upper bound on the per-tick time step
    pub max_dt: f32,
    /// Reaction model constants
    pub reaction: ReactionParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temperature: 2.0,
            propane_count: 8,
            oxygen_count: 40,
            speed_scale: DEFAULT_SPEED_SCALE,
            max_dt: DEFAULT_MAX_DT,
            reaction: ReactionParams::default(),
        }
    }
}

impl SimulationParams {
    /// Replace unusable values so the simulation always runs
    ///
    /// Negative or non-finite temperatures become zero; a non-finite speed scale
    /// or step bound falls back to its default.
    pub fn sanitized(mut self) -> Self {
        self.temperature = sanitize_temperature(self.temperature);
        if !self.speed_scale.is_finite() || self.speed_scale < 0.0 {
            self.speed_scale = DEFAULT_SPEED_SCALE;
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            self.max_dt = DEFAULT_MAX_DT;
        }
        self.reaction = self.reaction.sanitized();
        self
    }
}

fn sanitize_temperature(temperature: f32) -> f32 {
    if temperature.is_finite() {
        temperature.max(0.0)
    } else {
        0.0
    }
}

/// One independent simulation instance
pub struct Simulation<R: SimRng = DefaultRng> {
    population: Population,
    params: SimulationParams,
    field: PlayField,
    seed_area: PlayField,
    rng: R,
    paused: bool,
    labels_visible: bool,
    /// Simulated seconds since the last reset (pauses excluded)
    elapsed: f32,
    /// Evaluation passes run since the last reset
    passes: u64,
}

impl Simulation<DefaultRng> {
    /// Create a simulation with a reproducible random sequence
    pub fn seeded(field: PlayField, seed: u64) -> Self {
        Self::new(field, DefaultRng::seed_from_u64(seed))
    }

    /// Create a simulation seeded from OS entropy
    pub fn from_entropy(field: PlayField) -> Self {
        Self::new(field, DefaultRng::from_entropy())
    }
}

impl<R: SimRng> Simulation<R> {
    /// Create an empty simulation over `field`
    ///
    /// Nothing is seeded until [`Self::reset`] is called.
    pub fn new(field: PlayField, rng: R) -> Self {
        Self {
            population: Population::new(),
            params: SimulationParams::default(),
            field,
            seed_area: field.inset_far(0.0, SEED_BOTTOM_CLEARANCE),
            rng,
            paused: false,
            labels_visible: true,
            elapsed: 0.0,
            passes: 0,
        }
    }

    /// Discard all particles and seed fresh reactants from `params`
    ///
    /// Also clears the pause flag.
    pub fn reset(&mut self, params: SimulationParams) {
        self.params = params.sanitized();
        self.population.clear();

        for _ in 0..self.params.propane_count {
            let particle = Particle::spawn_in(Species::Propane, &self.seed_area, &mut self.rng);
            self.population.push(particle);
        }
        for _ in 0..self.params.oxygen_count {
            let particle = Particle::spawn_in(Species::Oxygen, &self.seed_area, &mut self.rng);
            self.population.push(particle);
        }

        self.paused = false;
        self.elapsed = 0.0;
        self.passes = 0;

        log::info!(
            "Seeded {} C3H8 and {} O2 at temperature {:.2}",
            self.params.propane_count,
            self.params.oxygen_count,
            self.params.temperature
        );
    }

    /// Reseed with the current parameters
    pub fn restart(&mut self) {
        let params = self.params.clone();
        self.reset(params);
    }

    /// Advance the simulation by one frame
    ///
    /// `dt` is clamped to `[0, max_dt]`. While paused nothing moves and `None`
    /// is returned; otherwise all species move, then one reaction pass runs.
    pub fn tick(&mut self, dt: f32) -> Option<PassReport> {
        if self.paused {
            return None;
        }
        let dt = self.clamp_dt(dt);

        self.integrate_motion(dt);
        let report = self.evaluate_reactions(dt);

        self.elapsed += dt;
        self.passes += 1;
        Some(report)
    }

    /// Move every species by one step, returning the number of wall contacts
    ///
    /// `dt` is clamped to `[0, max_dt]` here as well, so direct callers get the
    /// same step bound as [`Self::tick`].
    pub fn integrate_motion(&mut self, dt: f32) -> usize {
        let dt = self.clamp_dt(dt);
        let base = speed_multiplier(self.params.temperature, self.params.speed_scale);
        let mut contacts = 0;

        for species in Species::ALL {
            let multiplier = base * species.speed_factor();
            contacts += integrate(self.population.of_mut(species), dt, multiplier, &self.field);
        }
        contacts
    }

    /// Run one reaction evaluation pass without moving anything
    ///
    /// `dt` is clamped to `[0, max_dt]` before it ages armed propane.
    pub fn evaluate_reactions(&mut self, dt: f32) -> PassReport {
        let dt = self.clamp_dt(dt);
        evaluate(
            &mut self.population,
            dt,
            self.params.temperature,
            &self.params.reaction,
            &self.field,
            &mut self.rng,
        )
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.params.max_dt)
        } else {
            0.0
        }
    }

    /// Change the temperature without reseeding
    pub fn set_temperature(&mut self, temperature: f32) {
        self.params.temperature = sanitize_temperature(temperature);
    }

    /// Current temperature
    pub fn temperature(&self) -> f32 {
        self.params.temperature
    }

    /// Toggle the pause flag, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the pause flag
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether ticks are currently skipped
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle label visibility, returning the new state
    pub fn toggle_labels(&mut self) -> bool {
        self.labels_visible = !self.labels_visible;
        self.labels_visible
    }

    /// Set label visibility
    pub fn set_labels_visible(&mut self, visible: bool) {
        self.labels_visible = visible;
    }

    /// Whether the renderer should draw species labels
    pub fn labels_visible(&self) -> bool {
        self.labels_visible
    }

    /// Read-only access to all particles
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Mutable access to all particles, for building scenarios by hand
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Current count per species
    pub fn tally(&self) -> Tally {
        self.population.tally()
    }

    /// Parameters of the current run
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Rectangle particles are confined to
    pub fn field(&self) -> &PlayField {
        &self.field
    }

    /// Simulated seconds since the last reset, excluding pauses
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Evaluation passes since the last reset
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combustion_math::Vec2;

    fn params(propane: usize, oxygen: usize) -> SimulationParams {
        SimulationParams {
            propane_count: propane,
            oxygen_count: oxygen,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_new_is_empty() {
        let sim = Simulation::seeded(PlayField::default(), 1);
        assert!(sim.population().is_empty());
        assert!(!sim.is_paused());
        assert!(sim.labels_visible());
    }

    #[test]
    fn test_reset_seeds_counts() {
        let mut sim = Simulation::seeded(PlayField::default(), 1);
        sim.reset(params(7, 33));

        let tally = sim.tally();
        assert_eq!(tally.propane, 7);
        assert_eq!(tally.oxygen, 33);
        assert_eq!(tally.carbon_dioxide, 0);
        assert_eq!(tally.water, 0);
    }

    #[test]
    fn test_reset_seeds_above_hud_strip() {
        let field = PlayField::default();
        let mut sim = Simulation::seeded(field, 5);
        sim.reset(params(50, 200));

        for particle in sim.population().iter() {
            assert!(field.contains(particle.position));
            assert!(particle.position.y < field.max.y - SEED_BOTTOM_CLEARANCE);
        }
    }

    #[test]
    fn test_reset_clears_pause_and_products() {
        let mut sim = Simulation::seeded(PlayField::default(), 1);
        sim.reset(params(1, 1));
        sim.population_mut()
            .push(Particle::new(Species::Water, Vec2::new(100.0, 100.0)));
        sim.toggle_pause();
        assert!(sim.is_paused());

        sim.restart();

        assert!(!sim.is_paused());
        assert_eq!(sim.tally().water, 0);
        assert_eq!(sim.passes(), 0);
    }

    #[test]
    fn test_paused_tick_does_nothing() {
        let mut sim = Simulation::seeded(PlayField::default(), 3);
        sim.reset(params(3, 3));
        let before: Vec<Vec2> = sim.population().iter().map(|p| p.position).collect();

        sim.set_paused(true);
        assert_eq!(sim.tick(0.016), None);

        let after: Vec<Vec2> = sim.population().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(sim.passes(), 0);
    }

    #[test]
    fn test_tick_clamps_dt() {
        let mut sim = Simulation::seeded(PlayField::default(), 3);
        sim.reset(params(0, 0));

        sim.tick(5.0);
        assert!((sim.elapsed() - DEFAULT_MAX_DT).abs() < 1e-6);

        sim.tick(-1.0);
        sim.tick(f32::NAN);
        assert!((sim.elapsed() - DEFAULT_MAX_DT).abs() < 1e-6);
        assert_eq!(sim.passes(), 3);
    }

    #[test]
    fn test_helpers_clamp_dt() {
        let mut sim = Simulation::seeded(PlayField::default(), 3);
        sim.reset(params(0, 0));
        let start = Vec2::new(400.0, 200.0);
        sim.population_mut()
            .push(Particle::new(Species::Oxygen, start).with_velocity(Vec2::new(10.0, 0.0)));
        let mut armed = Particle::new(Species::Propane, Vec2::new(100.0, 100.0));
        armed.armed_count = 1;
        sim.population_mut().push(armed);

        sim.integrate_motion(10.0);
        let dx = sim.population().of(Species::Oxygen)[0].position.x - start.x;
        // 10 * multiplier 1.0 * max_dt
        assert!((dx - 10.0 * DEFAULT_MAX_DT).abs() < 1e-4);

        // A huge step would cool the propane down if it were not clamped
        let report = sim.evaluate_reactions(10.0);
        assert_eq!(report.decayed, 0);
        let propane = &sim.population().of(Species::Propane)[0];
        assert!((propane.armed_elapsed - DEFAULT_MAX_DT).abs() < 1e-6);
    }

    #[test]
    fn test_products_move_slower() {
        let mut sim = Simulation::seeded(PlayField::default(), 3);
        sim.reset(params(0, 0));
        let start = Vec2::new(400.0, 200.0);
        let velocity = Vec2::new(10.0, 0.0);
        sim.population_mut()
            .push(Particle::new(Species::Oxygen, start).with_velocity(velocity));
        sim.population_mut()
            .push(Particle::new(Species::Water, start).with_velocity(velocity));

        sim.integrate_motion(0.02);

        let oxygen_dx = sim.population().of(Species::Oxygen)[0].position.x - start.x;
        let water_dx = sim.population().of(Species::Water)[0].position.x - start.x;
        // temperature 2.0 -> multiplier 1.0
        assert!((oxygen_dx - 0.2).abs() < 1e-4);
        assert!((water_dx - 0.18).abs() < 1e-4);
    }

    #[test]
    fn test_toggles() {
        let mut sim = Simulation::seeded(PlayField::default(), 1);
        assert!(sim.toggle_pause());
        assert!(!sim.toggle_pause());
        assert!(!sim.toggle_labels());
        assert!(sim.toggle_labels());
    }

    #[test]
    fn test_temperature_is_sanitized() {
        let mut sim = Simulation::seeded(PlayField::default(), 1);
        sim.set_temperature(-3.0);
        assert_eq!(sim.temperature(), 0.0);
        sim.set_temperature(f32::NAN);
        assert_eq!(sim.temperature(), 0.0);
        sim.set_temperature(3.5);
        assert_eq!(sim.temperature(), 3.5);

        sim.reset(SimulationParams {
            temperature: f32::INFINITY,
            ..SimulationParams::default()
        });
        assert_eq!(sim.temperature(), 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Simulation::seeded(PlayField::default(), 77);
        let mut b = Simulation::seeded(PlayField::default(), 77);
        a.reset(params(10, 60));
        b.reset(params(10, 60));

        for _ in 0..300 {
            assert_eq!(a.tick(0.016), b.tick(0.016));
        }

        assert_eq!(a.tally(), b.tally());
        let pa: Vec<Vec2> = a.population().iter().map(|p| p.position).collect();
        let pb: Vec<Vec2> = b.population().iter().map(|p| p.position).collect();
        assert_eq!(pa, pb);
    }
}
