//! Combustion Rendering Library
//!
//! This crate provides the wgpu-based rendering of a running simulation.
//! It only reads simulation state; nothing here feeds back into the model.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ParticlePipeline`] - Instanced disc rendering
//! - [`molecule::MoleculeStyle`] - Turns species into atom clusters and label badges

pub mod context;
pub mod molecule;
pub mod pipeline;

pub use context::{RenderContext, RenderError};
pub use molecule::{
    atom_layout, badge_color, build_instances, instance_estimate, Atom, AtomSpec, MoleculeStyle,
};
pub use pipeline::{ParticleInstance, ParticlePipeline, ViewUniforms};
