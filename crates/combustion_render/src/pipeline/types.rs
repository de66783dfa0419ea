//! GPU-compatible data types for the particle pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// Vertices per instanced quad (two triangles, generated in the vertex shader)
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// One disc on screen: an atom or a label badge
/// Layout: 32 bytes (must match particles.wgsl InstanceInput)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Center in canvas pixels, y pointing down
    pub center: [f32; 2],
    /// Radius in canvas pixels
    pub radius: f32,
    /// Outline darkening at the rim, 0 for none
    pub outline: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl ParticleInstance {
    /// Create a disc with the default rim outline
    pub fn new(center: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            outline: 0.2,
            color,
        }
    }

    /// Same disc without an outline
    pub fn flat(mut self) -> Self {
        self.outline = 0.0;
        self
    }
}

/// Per-frame uniforms
/// Layout: 16 bytes (must match particles.wgsl ViewUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewUniforms {
    /// Logical canvas size the instance coordinates are expressed in
    pub canvas_size: [f32; 2],
    /// Padding for 16-byte alignment
    pub _padding: [f32; 2],
}

impl ViewUniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            canvas_size: [width.max(1.0), height.max(1.0)],
            _padding: [0.0; 2],
        }
    }
}

impl Default for ViewUniforms {
    fn default() -> Self {
        Self::new(900.0, 600.0)
    }
}
