//! Integration tests for the simulation pipeline
//!
//! These tests drive whole simulations through `Simulation::tick` and the
//! free-standing integrator/evaluator, checking:
//! 1. Motion stays inside the play field with reflective walls
//! 2. Population bookkeeping matches every reaction pass
//! 3. The armed state never reaches the threshold while alive and cools down
//! 4. Hand-built scenarios complete (or stay idle) as expected

use combustion_math::{PlayField, Vec2};
use combustion_sim::{
    integrate, Particle, ReactionParams, Simulation, SimulationParams, Species, THRESHOLD,
};

fn params(propane: usize, oxygen: usize, temperature: f32) -> SimulationParams {
    SimulationParams {
        temperature,
        propane_count: propane,
        oxygen_count: oxygen,
        ..SimulationParams::default()
    }
}

/// Parameters under which every encounter is accepted at temperature 4
fn always_accept(propane: usize, oxygen: usize) -> SimulationParams {
    SimulationParams {
        reaction: ReactionParams {
            probability_cap: 1.0,
            ..ReactionParams::default()
        },
        ..params(propane, oxygen, 4.0)
    }
}

/// An empty simulation with one stationary propane and `oxygen` stationary
/// oxygen stacked within the capture radius
fn stacked_scenario(sim_params: SimulationParams, oxygen: usize, seed: u64) -> Simulation {
    let mut sim = Simulation::seeded(PlayField::default(), seed);
    sim.reset(SimulationParams {
        propane_count: 0,
        oxygen_count: 0,
        ..sim_params
    });

    let center = Vec2::new(300.0, 200.0);
    sim.population_mut().push(Particle::new(Species::Propane, center));
    for k in 0..oxygen {
        let offset = Vec2::new(k as f32 * 3.0, 5.0);
        sim.population_mut().push(Particle::new(Species::Oxygen, center + offset));
    }
    sim
}

// ==================== Motion Tests ====================

/// Every particle stays inside the field for every tick
#[test]
fn test_positions_stay_in_bounds() {
    for seed in [1, 2, 3] {
        let mut sim = Simulation::seeded(PlayField::default(), seed);
        sim.reset(params(20, 100, 5.0));
        let field = *sim.field();

        for tick in 0..2000 {
            sim.tick(0.033);
            for particle in sim.population().iter() {
                assert!(
                    field.contains(particle.position),
                    "seed {} tick {}: {:?} left the field",
                    seed,
                    tick,
                    particle.position
                );
            }
        }
    }
}

/// An axis that overshoots is clamped and its velocity sign flips
#[test]
fn test_clamped_axis_flips_velocity() {
    let field = PlayField::default();
    let mut sim = Simulation::seeded(field, 9);
    sim.reset(params(0, 200, 5.0));
    let mut particles: Vec<Particle> = sim.population().of(Species::Oxygen).to_vec();

    let dt = 0.033;
    // temperature 5 -> multiplier 6.25
    let multiplier = 6.25;
    let mut flips = 0;

    for _ in 0..500 {
        let before = particles.clone();
        integrate(&mut particles, dt, multiplier, &field);

        for (old, new) in before.iter().zip(&particles) {
            let predicted = old.position + old.velocity * (dt * multiplier);

            let x_out = predicted.x < field.min.x || predicted.x > field.max.x;
            let y_out = predicted.y < field.min.y || predicted.y > field.max.y;

            if x_out {
                assert_eq!(new.velocity.x, -old.velocity.x);
                assert!(new.position.x == field.min.x || new.position.x == field.max.x);
                flips += 1;
            } else {
                assert_eq!(new.velocity.x, old.velocity.x);
            }
            if y_out {
                assert_eq!(new.velocity.y, -old.velocity.y);
                assert!(new.position.y == field.min.y || new.position.y == field.max.y);
                flips += 1;
            } else {
                assert_eq!(new.velocity.y, old.velocity.y);
            }
        }
    }

    assert!(flips > 0, "run too short to hit any wall");
}

/// At temperature zero nothing moves, but overlapping seeds still react
#[test]
fn test_zero_temperature_freezes_motion_but_reacts() {
    let mut sim = stacked_scenario(params(0, 0, 0.0), 5, 31);
    // Give everything a velocity: it must not matter
    for species in [Species::Propane, Species::Oxygen] {
        for particle in sim.population_mut().of_mut(species) {
            particle.velocity = Vec2::new(50.0, -50.0);
        }
    }
    let oxygen_before: Vec<Vec2> = sim
        .population()
        .of(Species::Oxygen)
        .iter()
        .map(|p| p.position)
        .collect();

    let report = sim.tick(0.016).expect("not paused");
    assert_eq!(sim.population().of(Species::Propane)[0].position, Vec2::new(300.0, 200.0));
    // The first tick moves nothing; consumed oxygen simply disappear
    let oxygen_after: Vec<Vec2> = sim
        .population()
        .of(Species::Oxygen)
        .iter()
        .map(|p| p.position)
        .collect();
    assert!(oxygen_after.iter().all(|p| oxygen_before.contains(p)));
    assert_eq!(report.encounters, 1);

    for _ in 0..400 {
        sim.tick(0.016);
        if sim.tally().propane == 0 {
            break;
        }
    }

    let tally = sim.tally();
    assert_eq!(tally.propane, 0, "p = 0.468 per pass should finish well within 400 passes");
    assert_eq!(tally.carbon_dioxide, 3);
    assert_eq!(tally.water, 4);
}

// ==================== Population Bookkeeping Tests ====================

/// Per pass: oxygen removed equals accepted encounters, and each conversion
/// removes one propane and adds exactly 3 CO2 + 4 H2O
#[test]
fn test_population_conservation_per_pass() {
    let mut sim = Simulation::seeded(PlayField::default(), 4242);
    sim.reset(params(30, 150, 3.0));
    let mut total_conversions = 0;

    for _ in 0..3000 {
        let before = sim.tally();
        let report = sim.tick(0.033).expect("not paused");
        let after = sim.tally();

        assert_eq!(before.oxygen - after.oxygen, report.accepted);
        assert_eq!(report.oxygen_consumed, report.accepted);
        assert_eq!(before.propane - after.propane, report.conversions);
        assert_eq!(after.carbon_dioxide - before.carbon_dioxide, 3 * report.conversions);
        assert_eq!(after.water - before.water, 4 * report.conversions);
        assert!(report.accepted <= report.encounters);

        total_conversions += report.conversions;
    }

    assert!(total_conversions > 0, "expected at least one conversion");
}

/// A live propane is never observed with five or more accepted encounters
#[test]
fn test_armed_count_never_reaches_threshold() {
    let mut sim = Simulation::seeded(PlayField::default(), 7);
    sim.reset(params(25, 200, 4.0));

    for _ in 0..3000 {
        sim.tick(0.033);
        for propane in sim.population().of(Species::Propane) {
            assert!(propane.armed_count < THRESHOLD, "armed_count {}", propane.armed_count);
        }
    }
}

/// Products are never removed
#[test]
fn test_products_only_accumulate() {
    let mut sim = Simulation::seeded(PlayField::default(), 99);
    sim.reset(params(20, 120, 4.0));
    let mut last = sim.tally();

    for _ in 0..2000 {
        sim.tick(0.033);
        let now = sim.tally();
        assert!(now.carbon_dioxide >= last.carbon_dioxide);
        assert!(now.water >= last.water);
        last = now;
    }
}

// ==================== Scenario Tests ====================

/// One propane and five overlapping oxygen with p = 1 convert in at most five passes
#[test]
fn test_full_conversion_within_five_passes() {
    let mut sim = stacked_scenario(always_accept(0, 0), 5, 1);

    for pass in 1..=5 {
        let report = sim.evaluate_reactions(0.016);
        assert_eq!(report.accepted, 1, "pass {} should accept", pass);
    }

    let tally = sim.tally();
    assert_eq!(tally.propane, 0);
    assert_eq!(tally.oxygen, 0);
    assert_eq!(tally.carbon_dioxide, 3);
    assert_eq!(tally.water, 4);
}

/// Four accepted encounters leave the propane armed at four, not converted
#[test]
fn test_partial_progress_keeps_propane() {
    let mut sim = stacked_scenario(always_accept(0, 0), 4, 1);

    for _ in 0..10 {
        sim.evaluate_reactions(0.016);
    }

    let tally = sim.tally();
    assert_eq!(tally.propane, 1);
    assert_eq!(tally.oxygen, 0);
    assert_eq!(sim.population().of(Species::Propane)[0].armed_count, 4);
}

/// A lone propane never changes anything
#[test]
fn test_lone_propane_is_inert() {
    let mut sim = Simulation::seeded(PlayField::default(), 12);
    sim.reset(params(1, 0, 5.0));

    for _ in 0..1000 {
        let report = sim.tick(0.033).expect("not paused");
        assert!(report.is_quiet());
    }

    let tally = sim.tally();
    assert_eq!(tally.propane, 1);
    assert_eq!(tally.carbon_dioxide + tally.water, 0);
}

/// An armed propane that gets nothing for longer than the window cools down
#[test]
fn test_armed_decay_resets_progress() {
    let mut sim = stacked_scenario(always_accept(0, 0), 2, 5);

    sim.evaluate_reactions(0.016);
    sim.evaluate_reactions(0.016);
    assert_eq!(sim.population().of(Species::Propane)[0].armed_count, 2);

    // 36 * 0.033 = 1.188 s: still inside the 1.2 s window
    for _ in 0..36 {
        sim.evaluate_reactions(0.033);
    }
    assert_eq!(sim.population().of(Species::Propane)[0].armed_count, 2);

    // One more step crosses it
    let report = sim.evaluate_reactions(0.033);
    assert_eq!(report.decayed, 1);
    assert_eq!(sim.population().of(Species::Propane)[0].armed_count, 0);
}

/// Reset reseeds from scratch and drops products
#[test]
fn test_reset_after_reaction() {
    let mut sim = stacked_scenario(always_accept(0, 0), 5, 1);
    for _ in 0..5 {
        sim.evaluate_reactions(0.016);
    }
    assert_eq!(sim.tally().water, 4);

    sim.reset(params(3, 15, 2.0));

    let tally = sim.tally();
    assert_eq!(tally.propane, 3);
    assert_eq!(tally.oxygen, 15);
    assert_eq!(tally.carbon_dioxide, 0);
    assert_eq!(tally.water, 0);
}

/// Enough oxygen for every propane burns the whole batch eventually
#[test]
fn test_stoichiometric_mixture_burns_out() {
    let mut sim = Simulation::seeded(PlayField::default(), 2718);
    sim.reset(always_accept(6, 30));

    for _ in 0..60_000 {
        sim.tick(0.033);
        if sim.tally().propane == 0 {
            break;
        }
    }

    let tally = sim.tally();
    // Armed propane may cool down, so oxygen can run out first; what burned must balance
    let burned = 6 - tally.propane;
    assert_eq!(tally.carbon_dioxide, 3 * burned);
    assert_eq!(tally.water, 4 * burned);
    assert!(burned > 0);
}
