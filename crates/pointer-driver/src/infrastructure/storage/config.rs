//! TOML-based configuration for the pointer driver.
//!
//! ```toml
//! [driver]
//! log_level = "info"
//! fixed_layout = true
//! seed = 42                 # optional: reproducible runs
//!
//! [motion]
//! default_speed = "medium"  # slow | medium | fast | fastest
//! waypoint_delay_ms = 1
//! pause_min_ms = 10
//! pause_max_ms = 20
//! jitter_probability = 0.5
//!
//! [calibration]
//! diagonal_inches = 27.0    # optional: skip the resolution table
//! ```
//!
//! Every field has a `#[serde(default = "...")]` helper and every section is
//! optional, so an empty or partial file loads cleanly.  A missing file is
//! not an error: [`load_config`] returns the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pointer_core::Speed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::lifecycle::GateSettings;
use crate::application::pointer::PointerSettings;
use crate::infrastructure::screen::ScreenConfig;
use crate::infrastructure::zones::ZoneConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, including unknown speed labels.
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but its values are inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Zone declarations; the built-in set is used when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<ZoneConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed-size client layout (`true`) or resizable (`false`).
    #[serde(default = "default_true")]
    pub fixed_layout: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotionConfig {
    #[serde(default = "default_speed")]
    pub default_speed: Speed,
    #[serde(default = "default_waypoint_delay_ms")]
    pub waypoint_delay_ms: u64,
    #[serde(default = "default_pause_min_ms")]
    pub pause_min_ms: u64,
    #[serde(default = "default_pause_max_ms")]
    pub pause_max_ms: u64,
    #[serde(default = "default_jitter_probability")]
    pub jitter_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CalibrationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_inches: Option<f64>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_speed() -> Speed {
    Speed::Medium
}
fn default_waypoint_delay_ms() -> u64 {
    1
}
fn default_pause_min_ms() -> u64 {
    10
}
fn default_pause_max_ms() -> u64 {
    20
}
fn default_jitter_probability() -> f64 {
    0.5
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fixed_layout: default_true(),
            seed: None,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
            waypoint_delay_ms: default_waypoint_delay_ms(),
            pause_min_ms: default_pause_min_ms(),
            pause_max_ms: default_pause_max_ms(),
            jitter_probability: default_jitter_probability(),
        }
    }
}

impl AppConfig {
    /// Rejects values that parse but make no sense together.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        if m.pause_min_ms > m.pause_max_ms {
            return Err(ConfigError::Invalid(format!(
                "motion.pause_min_ms ({}) exceeds motion.pause_max_ms ({})",
                m.pause_min_ms, m.pause_max_ms
            )));
        }
        if !(0.0..=1.0).contains(&m.jitter_probability) {
            return Err(ConfigError::Invalid(format!(
                "motion.jitter_probability must be within [0, 1], got {}",
                m.jitter_probability
            )));
        }
        if let Some(zone) = self
            .zones
            .iter()
            .find(|z| i32::try_from(z.width).is_err() || i32::try_from(z.height).is_err())
        {
            return Err(ConfigError::Invalid(format!(
                "zone {:?} is larger than {} pixels",
                zone.name,
                i32::MAX
            )));
        }
        if let Some(inches) = self.calibration.diagonal_inches {
            if !(inches.is_finite() && inches > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "calibration.diagonal_inches must be positive, got {inches}"
                )));
            }
        }
        Ok(())
    }

    /// Gate settings for this config.  `seed_override` wins over
    /// `driver.seed`.
    pub fn gate_settings(&self, seed_override: Option<u64>) -> GateSettings {
        GateSettings {
            fixed_layout: self.driver.fixed_layout,
            pointer: PointerSettings {
                waypoint_delay: Duration::from_millis(self.motion.waypoint_delay_ms),
                pause_ms: (self.motion.pause_min_ms, self.motion.pause_max_ms),
                jitter_probability: self.motion.jitter_probability,
                diagonal_inches: self.calibration.diagonal_inches,
                seed: seed_override.or(self.driver.seed),
                start: None,
            },
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads and validates `AppConfig` from `path`, returning the defaults if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if validation fails.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
