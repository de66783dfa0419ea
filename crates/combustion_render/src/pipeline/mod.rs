//! Rendering pipeline components
//!
//! A single render pipeline draws every atom and label badge as an instanced,
//! antialiased disc.

pub mod types;
pub mod particle_pipeline;

pub use types::{ParticleInstance, ViewUniforms, QUAD_VERTEX_COUNT};
pub use particle_pipeline::ParticlePipeline;
