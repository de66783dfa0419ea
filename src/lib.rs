//! Propane combustion simulation application
//!
//! The simulation itself lives in `combustion_sim`; this crate wires it to a
//! window: configuration, keyboard commands, the frame clock, and the title
//! bar HUD.

pub mod config;
pub mod input;
pub mod systems;
