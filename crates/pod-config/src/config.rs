//! Viewer settings and their defaults, persisted as RON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted settings inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_DIR_NAME: &str = "space-observation-pod";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera placement, speed and zoom levels.
    pub camera: CameraConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Assets, lighting and animation rates.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position, inside the pod.
    pub start_position: [f32; 3],
    /// Movement speed in scene units per second.
    pub move_speed: f32,
    /// Field of view in degrees while the telescope is inactive.
    pub normal_zoom: f32,
    /// Field of view in degrees while the telescope is active.
    pub telescope_zoom: f32,
    /// Exponential approach rate of the zoom toward its target, per second.
    pub zoom_rate: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Degrees of yaw/pitch per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Invert the vertical look axis.
    pub invert_y: bool,
}

/// Scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory holding the texture images.
    pub asset_dir: PathBuf,
    /// Substitute a generated texture when an image is missing or unreadable.
    pub procedural_fallback: bool,
    /// World-space position of the point light.
    pub light_position: [f32; 3],
    /// RGB colour of the point light.
    pub light_color: [f32; 3],
    /// Planet spin about its own vertical axis, degrees per second.
    pub planet_spin_deg_per_sec: f32,
    /// Moon orbit advance, degrees per second.
    pub moon_orbit_deg_per_sec: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g., "debug", "info,pod_render=trace").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Space Observation Pod - Midterm Project".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 3.0],
            move_speed: 5.0,
            normal_zoom: 45.0,
            telescope_zoom: 20.0,
            zoom_rate: 5.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            invert_y: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            procedural_fallback: true,
            light_position: [-8.0, 5.0, -5.0],
            light_color: [1.0, 0.95, 0.8],
            planet_spin_deg_per_sec: 10.0,
            moon_orbit_deg_per_sec: 30.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Per-user directory that holds `config.ron`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or write and return the defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::Parse)
    }
}
