//! Window management system
//!
//! Handles window creation and the title bar, which doubles as the HUD.

use std::sync::Arc;
use combustion_sim::{Species, Tally};
use winit::{
    event_loop::ActiveEventLoop,
    window::Window,
};
use crate::config::WindowConfig;

/// What the title bar shows each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub tally: Tally,
    pub temperature: f32,
    pub paused: bool,
    pub labels: bool,
}

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    /// Last title set, to skip redundant updates
    last_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
            last_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Update window title with the tally and run state
    pub fn update_title(&mut self, hud: &HudState) {
        let title = format_title(&self.base_title, hud);
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Build the title bar text
///
/// With labels on, each count carries its formula; otherwise only the numbers
/// are shown, in the order C3H8, O2, CO2, H2O.
pub fn format_title(base: &str, hud: &HudState) -> String {
    let counts = if hud.labels {
        hud.tally.to_string()
    } else {
        Species::ALL
            .iter()
            .map(|&s| hud.tally.get(s).to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    };

    let state = if hud.paused { " [Paused]" } else { "" };
    format!("{} - {} - T:{:.1}{}", base, counts, hud.temperature, state)
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
