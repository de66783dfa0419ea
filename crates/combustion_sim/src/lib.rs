//! Propane combustion simulation
//!
//! This crate provides the simulation core, including:
//! - Species and particle records
//! - The per-species population store and its tally
//! - Reflective-wall motion integration
//! - The stepped, stochastic reaction model `C3H8 + 5 O2 -> 3 CO2 + 4 H2O`
//! - The [`Simulation`] context tying them together

pub mod integrator;
pub mod particle;
pub mod population;
pub mod reaction;
pub mod rng;
pub mod simulation;
pub mod species;

// Re-export commonly used types
pub use integrator::{integrate, speed_multiplier, DEFAULT_SPEED_SCALE};
pub use particle::{Particle, DEFAULT_VELOCITY_RANGE};
pub use population::{Population, Tally};
pub use reaction::{
    acceptance_probability, evaluate, PassReport, ReactionParams, CO2_YIELD, H2O_YIELD, THRESHOLD,
};
pub use rng::{DefaultRng, SimRng};
pub use simulation::{Simulation, SimulationParams, DEFAULT_MAX_DT};
pub use species::Species;
