//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The particle pipeline
//! - Turning the population into instances each frame

use std::sync::Arc;
use winit::window::Window;
use combustion_render::{
    build_instances, MoleculeStyle, ParticlePipeline, RenderContext, RenderError, ViewUniforms,
};
use combustion_sim::Population;
use crate::config::RenderingConfig;

/// Errors from drawing a single frame
#[derive(Debug)]
pub enum FrameError {
    /// Surface was lost or outdated and has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::SurfaceLost => write!(f, "Surface lost"),
            FrameError::OutOfMemory => write!(f, "Out of memory"),
            FrameError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ParticlePipeline,
    style: MoleculeStyle,
    background: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// `canvas` is the logical size particle positions are expressed in; it is
    /// stretched over the surface whatever the window size.
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        canvas: (f32, f32),
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;
        let pipeline = ParticlePipeline::new(&context.device, context.config.format);
        pipeline.update_uniforms(&context.queue, &ViewUniforms::new(canvas.0, canvas.1));

        let bg = render_config.background_color;
        log::info!(
            "Renderer ready: {}x{} surface, {:?}",
            context.size.width,
            context.size.height,
            context.config.format
        );

        Ok(Self {
            context,
            pipeline,
            style: MoleculeStyle::new(render_config.molecule_radius),
            background: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Render a single frame
    pub fn render_frame(&mut self, population: &Population, labels: bool) -> Result<(), FrameError> {
        let instances = build_instances(population, labels, &self.style);
        self.pipeline
            .upload_instances(&self.context.device, &self.context.queue, &instances);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.resize(self.context.size);
                return Err(FrameError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(FrameError::OutOfMemory),
            Err(e) => return Err(FrameError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(&mut encoder, &view, self.background);

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
