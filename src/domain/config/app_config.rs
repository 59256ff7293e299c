//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::{LIVE_GAIN, OVERVIEW_GAIN};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory for the recording library (defaults to the XDG data dir)
    pub output_dir: Option<String>,
    /// Preferred input device name (substring match, defaults to host default)
    pub device: Option<String>,
    /// Gain for the live level meter
    pub live_gain: Option<f32>,
    /// Gain for the persisted overview history
    pub overview_gain: Option<f32>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            output_dir: None,
            device: None,
            live_gain: Some(LIVE_GAIN),
            overview_gain: Some(OVERVIEW_GAIN),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            device: other.device.or(self.device),
            live_gain: other.live_gain.or(self.live_gain),
            overview_gain: other.overview_gain.or(self.overview_gain),
        }
    }

    /// Get the configured output directory, if any
    pub fn output_dir_path(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(PathBuf::from)
    }

    /// Get the live meter gain, or the built-in constant
    pub fn live_gain_or_default(&self) -> f32 {
        self.live_gain.unwrap_or(LIVE_GAIN)
    }

    /// Get the overview gain, or the built-in constant
    pub fn overview_gain_or_default(&self) -> f32 {
        self.overview_gain.unwrap_or(OVERVIEW_GAIN)
    }
}
