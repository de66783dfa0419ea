//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`COMB_SECTION__KEY`)

use combustion_input::ControlLimits;
use combustion_math::PlayField;
use combustion_sim::{ReactionParams, SimulationParams};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Initial simulation parameters
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Reaction model constants
    #[serde(default)]
    pub reaction: ReactionConfig,
    /// Keyboard control ranges
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`COMB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // COMB_SIMULATION__TEMPERATURE=3.5 -> simulation.temperature = 3.5
        figment = figment.merge(Env::prefixed("COMB_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Parameters for a fresh simulation run
    pub fn to_simulation_params(&self) -> SimulationParams {
        SimulationParams {
            temperature: self.simulation.temperature,
            propane_count: self.simulation.propane_count,
            oxygen_count: self.simulation.oxygen_count,
            speed_scale: self.simulation.speed_scale,
            max_dt: self.simulation.max_dt,
            reaction: self.reaction.to_reaction_params(),
        }
    }

    /// Play field for the configured canvas
    pub fn play_field(&self) -> PlayField {
        PlayField::for_canvas(self.window.width as f32, self.window.height as f32)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels, also the canvas width
    pub width: u32,
    /// Window height in pixels, also the canvas height
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Propane Combustion".to_string(),
            width: 900,
            height: 600,
            vsync: true,
        }
    }
}

/// Initial simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Starting temperature
    pub temperature: f32,
    /// Propane seeded on reset
    pub propane_count: usize,
    /// Oxygen seeded on reset
    pub oxygen_count: usize,
    /// Fixed RNG seed; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Largest time step per frame in seconds
    pub max_dt: f32,
    /// Constant in `speed = temperature^2 * speed_scale`
    pub speed_scale: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            temperature: params.temperature,
            propane_count: params.propane_count,
            oxygen_count: params.oxygen_count,
            seed: None,
            max_dt: params.max_dt,
            speed_scale: params.speed_scale,
        }
    }
}

/// Reaction model constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    /// Distance below which a propane/oxygen pair can react
    pub capture_radius: f32,
    /// Base factor of the acceptance probability
    pub base_probability: f32,
    /// Upper bound on the acceptance probability
    pub probability_cap: f32,
    /// Seconds an armed propane keeps its progress without a new encounter
    pub armed_window: f32,
    /// Maximum product offset per axis
    pub product_jitter: f32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        let params = ReactionParams::default();
        Self {
            capture_radius: params.capture_radius,
            base_probability: params.base_probability,
            probability_cap: params.probability_cap,
            armed_window: params.armed_window,
            product_jitter: params.product_jitter,
        }
    }
}

impl ReactionConfig {
    /// Convert to the simulation's reaction parameters
    pub fn to_reaction_params(&self) -> ReactionParams {
        ReactionParams {
            capture_radius: self.capture_radius,
            base_probability: self.base_probability,
            probability_cap: self.probability_cap,
            armed_window: self.armed_window,
            product_jitter: self.product_jitter,
        }
    }
}

/// Keyboard control ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub temperature_min: f32,
    pub temperature_max: f32,
    /// Temperature change per Up/Down press
    pub temperature_step: f32,
    /// Largest initial count for either reactant
    pub count_max: usize,
    /// Propane change per `[`/`]` press
    pub propane_step: usize,
    /// Oxygen change per `-`/`=` press
    pub oxygen_step: usize,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let limits = ControlLimits::default();
        Self {
            temperature_min: limits.temperature_min,
            temperature_max: limits.temperature_max,
            temperature_step: limits.temperature_step,
            count_max: limits.count_max,
            propane_step: limits.propane_step,
            oxygen_step: limits.oxygen_step,
        }
    }
}

impl ControlsConfig {
    /// Convert to the control panel's limits
    pub fn to_control_limits(&self) -> ControlLimits {
        ControlLimits {
            temperature_min: self.temperature_min,
            temperature_max: self.temperature_max,
            temperature_step: self.temperature_step,
            count_max: self.count_max,
            propane_step: self.propane_step,
            oxygen_step: self.oxygen_step,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Base atom radius in canvas pixels
    pub molecule_radius: f32,
    /// Show atom markers and species badges at startup
    pub show_labels: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.97, 0.97, 0.98, 1.0],
            molecule_radius: 14.0,
            show_labels: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log every reaction pass that changed something
    pub log_passes: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_passes: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 900);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.simulation.temperature, 2.0);
        assert_eq!(config.simulation.propane_count, 8);
        assert_eq!(config.simulation.oxygen_count, 40);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.reaction.capture_radius, 42.0);
    }

    #[test]
    fn test_defaults_match_simulation_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.to_simulation_params(), SimulationParams::default());
        assert_eq!(config.controls.to_control_limits(), ControlLimits::default());
    }

    #[test]
    fn test_play_field_from_window() {
        let field = AppConfig::default().play_field();
        assert_eq!(field, PlayField::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("capture_radius"));
        assert!(toml.contains("[controls]"));
        assert!(!toml.contains("seed"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[simulation]\ntemperature = 3.5\nseed = 7\n"))
            .extract()
            .unwrap();

        assert_eq!(config.simulation.temperature, 3.5);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.window.width, 900);
        assert_eq!(config.reaction.capture_radius, 42.0);
    }

    #[test]
    fn test_stoichiometry_is_not_configurable() {
        // Unknown keys are ignored, the equation stays fixed
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[reaction]\nthreshold = 8\nco2_yield = 0\narmed_window = 2.5\n"))
            .extract()
            .unwrap();

        assert_eq!(config.reaction.armed_window, 2.5);
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("threshold"));
        assert!(!toml.contains("yield"));
    }

    #[test]
    fn test_error_display() {
        let err: ConfigError = figment::Error::from("bad value".to_string()).into();
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
        assert!(msg.contains("bad value"));
    }
}
