//! Replay configuration.
//!
//! Read from a JSON file; every field has a default so an empty object is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::{ClockError, TICK_INTERVAL_MS};
use crate::loader::{default_manifest, TripFile};

const DEFAULT_DATA_DIR: &str = "assessment-fallback-data";

/// Default spacing of fleet snapshots: 15 minutes of simulation time.
const DEFAULT_SNAPSHOT_INTERVAL_MS: i64 = 15 * 60 * 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Speed(#[from] ClockError),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Directory holding the per-trip JSON event files.
    pub data_dir: PathBuf,
    /// Files to load, in display order.
    pub trip_files: Vec<TripFile>,
    /// Speed multiplier at start.
    pub initial_speed: f64,
    /// Real time between ticks.
    pub tick_interval_ms: u64,
    /// Simulation time between fleet snapshots.
    pub snapshot_interval_ms: i64,
    pub max_snapshots: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            trip_files: default_manifest(),
            initial_speed: 1.0,
            tick_interval_ms: TICK_INTERVAL_MS,
            snapshot_interval_ms: DEFAULT_SNAPSHOT_INTERVAL_MS,
            max_snapshots: 10_000,
        }
    }
}

impl ReplayConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ClockError::InvalidSpeed(self.initial_speed).into());
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::NotPositive("tick_interval_ms"));
        }
        if self.snapshot_interval_ms <= 0 {
            return Err(ConfigError::NotPositive("snapshot_interval_ms"));
        }
        if self.max_snapshots == 0 {
            return Err(ConfigError::NotPositive("max_snapshots"));
        }
        Ok(())
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_trip_files(mut self, trip_files: Vec<TripFile>) -> Self {
        self.trip_files = trip_files;
        self
    }

    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    pub fn with_snapshot_interval_ms(mut self, interval_ms: i64) -> Self {
        self.snapshot_interval_ms = interval_ms;
        self
    }

    pub fn with_max_snapshots(mut self, max_snapshots: usize) -> Self {
        self.max_snapshots = max_snapshots;
        self
    }
}
