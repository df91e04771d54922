//! Configuration loading and typed config structures for the crossing simulation.
//!
//! The configuration lives in `crossing-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, a loader that reads the file, and a validation pass that
//! rejects values the simulation cannot run with.

use std::path::Path;

use serde::Deserialize;

use crate::motion::{DEFAULT_PEDESTRIAN_SPEED, DEFAULT_VEHICLE_SPEED};
use crate::phase::{DEFAULT_AMBER_MS, DEFAULT_GREEN_MS, PhaseDurations};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<crate::phase::PhaseError> for ConfigError {
    fn from(source: crate::phase::PhaseError) -> Self {
        Self::Invalid {
            reason: source.to_string(),
        }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `crossing-config.yaml`. Every field has a
/// default matching the stock crossing (3 s green, 1 s amber, five cars per
/// road).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CrossingConfig {
    /// Signal phase durations.
    #[serde(default)]
    pub signals: SignalConfig,

    /// Actor pool and speeds.
    #[serde(default)]
    pub traffic: TrafficConfig,

    /// Frame loop pacing and bounds.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Renderer-facing options.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CrossingConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override display options:
    /// - `CROSSING_MAP_SWAP` overrides `display.map_swap`
    /// - `CROSSING_START_AT_NIGHT` overrides `display.start_at_night`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.display.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.signals.durations()?;
        self.traffic.validate()?;
        if self.engine.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "engine.frame_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Signal phase durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignalConfig {
    /// Green time for the X road.
    #[serde(default = "default_green_ms")]
    pub a_green_ms: u64,

    /// Amber time for the X road.
    #[serde(default = "default_amber_ms")]
    pub a_amber_ms: u64,

    /// Green time for the Z road.
    #[serde(default = "default_green_ms")]
    pub b_green_ms: u64,

    /// Amber time for the Z road.
    #[serde(default = "default_amber_ms")]
    pub b_amber_ms: u64,
}

impl SignalConfig {
    /// Build the validated duration table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any duration is 0.
    pub fn durations(&self) -> Result<PhaseDurations, ConfigError> {
        Ok(PhaseDurations::new(
            self.a_green_ms,
            self.a_amber_ms,
            self.b_green_ms,
            self.b_amber_ms,
        )?)
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            a_green_ms: default_green_ms(),
            a_amber_ms: default_amber_ms(),
            b_green_ms: default_green_ms(),
            b_amber_ms: default_amber_ms(),
        }
    }
}

/// Actor pool and speeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrafficConfig {
    /// Vehicles created on each road at start.
    #[serde(default = "default_vehicles_per_axis")]
    pub vehicles_per_axis: u32,

    /// Vehicle speed in units per second.
    #[serde(default = "default_vehicle_speed")]
    pub vehicle_speed: f64,

    /// Pedestrian speed in units per second.
    #[serde(default = "default_pedestrian_speed")]
    pub pedestrian_speed: f64,
}

impl TrafficConfig {
    /// Reject empty pools and unusable speeds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.vehicles_per_axis == 0 {
            return Err(ConfigError::Invalid {
                reason: "traffic.vehicles_per_axis must be at least 1".to_owned(),
            });
        }
        for (name, speed) in [
            ("vehicle_speed", self.vehicle_speed),
            ("pedestrian_speed", self.pedestrian_speed),
        ] {
            if !speed.is_finite() || speed < 0.0 {
                return Err(ConfigError::Invalid {
                    reason: format!("traffic.{name} must be a finite, non-negative number"),
                });
            }
        }
        Ok(())
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            vehicles_per_axis: default_vehicles_per_axis(),
            vehicle_speed: default_vehicle_speed(),
            pedestrian_speed: default_pedestrian_speed(),
        }
    }
}

/// Frame loop pacing and bounds.
///
/// A value of 0 for `max_frames` or `max_real_time_seconds` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Milliseconds between frames.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Stop after this many frames (0 = unlimited).
    #[serde(default)]
    pub max_frames: u64,

    /// Stop after this many wall-clock seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            max_frames: 0,
            max_real_time_seconds: 0,
        }
    }
}

/// Renderer-facing options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Start the run in night lighting.
    #[serde(default)]
    pub start_at_night: bool,

    /// Swap which physical signal heads serve which road.
    #[serde(default)]
    pub map_swap: bool,
}

impl DisplayConfig {
    /// Override display options with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(val) = env_flag("CROSSING_MAP_SWAP") {
            self.map_swap = val;
        }
        if let Some(val) = env_flag("CROSSING_START_AT_NIGHT") {
            self.start_at_night = val;
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Read a boolean environment variable (`1`/`true`/`yes` or `0`/`false`/`no`).
fn env_flag(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    parse_flag(&raw)
}

/// Parse a boolean flag value, ignoring case and surrounding whitespace.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_green_ms() -> u64 {
    DEFAULT_GREEN_MS
}

const fn default_amber_ms() -> u64 {
    DEFAULT_AMBER_MS
}

const fn default_vehicles_per_axis() -> u32 {
    5
}

const fn default_vehicle_speed() -> f64 {
    DEFAULT_VEHICLE_SPEED
}

const fn default_pedestrian_speed() -> f64 {
    DEFAULT_PEDESTRIAN_SPEED
}

const fn default_frame_interval_ms() -> u64 {
    16
}

fn default_log_level() -> String {
    "info".to_owned()
}
