//! Configuration for moodtune
//!
//! Stored as YAML; every section has defaults so a partial (or missing)
//! file is valid.
//!
//! ```yaml
//! detection:
//!   sample_interval_ms: 1000
//!   reaction_threshold: 0.6
//! playback:
//!   settle_delay_ms: 500
//! catalog_path: /home/me/music/moods.yaml
//! ```

mod io;
mod paths;

pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path};

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_SAMPLE_INTERVAL, DEFAULT_SETTLE_DELAY, REACTION_THRESHOLD};

/// Shortest sampling period accepted; faster ticks would only repeat frames
const MIN_SAMPLE_INTERVAL_MS: u64 = 50;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub detection: DetectionConfig,
    pub playback: PlaybackConfig,
    /// Catalog YAML file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            playback: PlaybackConfig::default(),
            catalog_path: None,
        }
    }
}

/// Emotion detection section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Milliseconds between two emotion samples
    pub sample_interval_ms: u64,
    /// Confidence a changed emotion must exceed to switch music (0.0-1.0)
    pub reaction_threshold: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL.as_millis() as u64,
            reaction_threshold: REACTION_THRESHOLD,
        }
    }
}

impl DetectionConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(MIN_SAMPLE_INTERVAL_MS))
    }
}

/// Playback section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Debounce between a completed load and automatic playback
    pub settle_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl PlaybackConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
