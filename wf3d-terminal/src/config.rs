/// Viewer configuration
///
/// Configuration is loaded from multiple sources with the following priority (lowest to highest):
/// 1. Built-in defaults
/// 2. `config/default.toml` (version controlled)
/// 3. `config/user.toml` (gitignored, user overrides)
/// 4. Environment variables (`WF3D_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wf3d_core::{Gestures, SceneOptions};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Startup solid, projection and culling
    #[serde(default)]
    pub scene: SceneOptions,
    /// Gesture and key step sizes
    #[serde(default)]
    pub input: InputConfig,
    /// Terminal canvas configuration
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // WF3D_SCENE__INITIAL_SOLID=cube -> scene.initial_solid = "cube"
        figment = figment.merge(Env::prefixed("WF3D_").split("__"));

        Ok(figment.extract()?)
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Rotation per dragged unit, in degrees
    pub drag_degrees_per_pixel: f64,
    /// Twist angle is divided by this before it becomes radians
    pub rotate_divisor: f64,
    /// Drag distance simulated by one arrow/WASD key press
    pub key_drag_pixels: f64,
    /// Twist angle sent by one q/e key press
    pub twist_angle: f64,
    /// Zoom factor per +/- key press or wheel notch
    pub zoom_step: f64,
    /// Translation per i/j/k/l key press
    pub scroll_pixels: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_degrees_per_pixel: 0.5,
            rotate_divisor: 20.0,
            key_drag_pixels: 10.0,
            twist_angle: 2.0,
            zoom_step: 1.1,
            scroll_pixels: 10.0,
        }
    }
}

impl InputConfig {
    pub fn gestures(&self) -> Gestures {
        Gestures {
            drag_degrees_per_pixel: self.drag_degrees_per_pixel,
            rotate_divisor: self.rotate_divisor,
        }
    }
}

/// Terminal canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Model units covered by one character column
    pub units_per_column: f64,
    /// Model units covered by one character row
    pub units_per_row: f64,
    /// Frame rate cap
    pub target_fps: u32,
    /// Directory for saved node files
    pub save_dir: PathBuf,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            units_per_column: 4.0,
            units_per_row: 8.0,
            target_fps: 30,
            save_dir: PathBuf::from("saved_nodes"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); capped at warn unless `log_file` is set
    pub log_level: String,
    /// Write logs here instead of stderr, which the canvas occupies
    pub log_file: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl DebugConfig {
    /// Default filter for the logger. Stderr shares the screen with the
    /// canvas, so chatty levels need a log file.
    pub fn filter(&self) -> &str {
        match (&self.log_file, self.log_level.to_ascii_lowercase().as_str()) {
            (Some(_), _) | (None, "off" | "error" | "warn") => self.log_level.as_str(),
            (None, _) => "warn",
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);
