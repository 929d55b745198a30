//! Configuration management for learnmap.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `learnmap.toml` file
//! 3. User config `~/.config/learnmap/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Curriculum data configuration.
    pub curriculum: CurriculumConfig,

    /// Render surface configuration.
    pub surface: SurfaceConfig,

    /// Storage configuration.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./learnmap.toml` (project local)
    /// 2. `~/.config/learnmap/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("learnmap").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("LEARNMAP_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Ok(file) = std::env::var("LEARNMAP_CURRICULUM") {
            self.curriculum.data_file = Some(file);
        }
        if let Ok(stage) = std::env::var("LEARNMAP_STAGE") {
            self.curriculum.default_stage = stage;
        }
    }

    /// Check values that would make the surface or navigator misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.surface;

        if !is_positive(s.width) || !is_positive(s.height) {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                s.width, s.height
            )));
        }
        if !is_positive(s.hit_radius) {
            return Err(ConfigError::Invalid("surface.hit_radius must be positive".into()));
        }
        if !s.tap_slop.is_finite() || s.tap_slop < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "surface.tap_slop must be zero or positive, got {}",
                s.tap_slop
            )));
        }
        // Radius must grow strictly with mastery.
        if !is_positive(s.node_radius_min)
            || !s.node_radius_max.is_finite()
            || s.node_radius_min >= s.node_radius_max
        {
            return Err(ConfigError::Invalid(format!(
                "node radius range is invalid: {}..{}",
                s.node_radius_min, s.node_radius_max
            )));
        }
        if !is_positive(s.zoom_threshold)
            || !is_positive(s.zoom_in_factor)
            || !is_positive(s.zoom_out_factor)
        {
            return Err(ConfigError::Invalid(
                "zoom threshold and factors must be positive".into(),
            ));
        }
        if s.pulse_period_ms == 0 {
            return Err(ConfigError::Invalid("surface.pulse_period_ms must be non-zero".into()));
        }
        if self.curriculum.fallback_prerequisite.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "curriculum.fallback_prerequisite must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Finite and greater than zero; NaN fails.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Curriculum data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    /// Path to a curriculum YAML file. Uses the built-in catalog when unset.
    pub data_file: Option<String>,

    /// Stage used when a grade string matches no stage.
    pub default_stage: String,

    /// Label returned for prerequisite lookups on unknown knowledge points.
    pub fallback_prerequisite: String,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            default_stage: DEFAULT_STAGE.to_string(),
            fallback_prerequisite: DEFAULT_FALLBACK_PREREQUISITE.to_string(),
        }
    }
}

/// Render surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Canvas width in pixels.
    pub width: f64,

    /// Canvas height in pixels.
    pub height: f64,

    /// Hit-test radius in pixels.
    pub hit_radius: f64,

    /// Maximum pointer travel for a tap.
    pub tap_slop: f64,

    /// Radius of a node with zero mastery.
    pub node_radius_min: f64,

    /// Radius of a fully mastered node.
    pub node_radius_max: f64,

    /// Mean centre distance separating zoom-in from zoom-out.
    pub zoom_threshold: f64,

    /// Scale applied when zooming in.
    pub zoom_in_factor: f64,

    /// Scale applied when zooming out.
    pub zoom_out_factor: f64,

    /// Highlight pulse period in milliseconds.
    pub pulse_period_ms: u64,

    /// Entrance animation duration in milliseconds.
    pub entrance_duration_ms: u64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            hit_radius: DEFAULT_HIT_RADIUS,
            tap_slop: DEFAULT_TAP_SLOP,
            node_radius_min: DEFAULT_NODE_RADIUS_MIN,
            node_radius_max: DEFAULT_NODE_RADIUS_MAX,
            zoom_threshold: DEFAULT_ZOOM_THRESHOLD,
            zoom_in_factor: DEFAULT_ZOOM_IN_FACTOR,
            zoom_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            pulse_period_ms: DEFAULT_PULSE_PERIOD_MS,
            entrance_duration_ms: DEFAULT_ENTRANCE_DURATION_MS,
        }
    }
}

impl SurfaceConfig {
    /// Pulse period as a duration.
    pub fn pulse_period(&self) -> Duration {
        Duration::from_millis(self.pulse_period_ms)
    }

    /// Entrance animation length as a duration.
    pub fn entrance_duration(&self) -> Duration {
        Duration::from_millis(self.entrance_duration_ms)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for learnmap data (default: ".learnmap").
    pub data_dir: String,

    /// Mastery records file name.
    pub mastery_file: String,

    /// Log file name used by the terminal UI.
    pub log_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            mastery_file: DEFAULT_MASTERY_FILE.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Get the full path to the mastery records file.
    pub fn mastery_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.mastery_file)
    }

    /// Get the full path to the log file.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.log_file)
    }
}
