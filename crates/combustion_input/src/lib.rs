//! Parameter controls
//!
//! This crate holds the user-adjustable simulation parameters and maps
//! keyboard input onto them, standing in for the sliders of a control panel.

mod control_panel;

pub use control_panel::{ControlChange, ControlLimits, ControlPanel};
