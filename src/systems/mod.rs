//! Application systems
//!
//! Modular systems kept out of main.rs for better organization and testability.

mod render;
mod simulation;
mod window;

pub use render::{FrameError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{format_title, HudState, WindowError, WindowSystem};
