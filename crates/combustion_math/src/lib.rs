//! 2D Mathematics Library
//!
//! This crate provides the small amount of geometry the combustion simulation needs.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`PlayField`] - Axis-aligned rectangle particles are confined to

mod vec2;
pub mod field;

pub use vec2::Vec2;
pub use field::PlayField;
