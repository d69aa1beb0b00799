//! Virtual replay clock.
//!
//! Time is Unix milliseconds. One [SimulationClock::tick] stands for one real second of
//! playback and moves the clock forward by `1000 ms × speed`. The runner decides when a tick
//! is due; the clock itself never reads wall time.

use bevy_ecs::prelude::Resource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::trip::Trip;

pub const ONE_SEC_MS: i64 = 1000;

/// Real time between two ticks while playing.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Start time used when no loaded trip has any event: 2025-11-03T08:00:00Z.
pub const DEFAULT_INITIAL_TIME_MS: i64 = 1_762_156_800_000;

/// Speed multipliers offered by playback controls. Any positive value is accepted.
pub const SPEED_PRESETS: [f64; 5] = [1.0, 5.0, 10.0, 50.0, 100.0];

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ClockError {
    #[error("speed multiplier must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
}

fn check_speed(speed: f64) -> Result<f64, ClockError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(ClockError::InvalidSpeed(speed))
    }
}

/// Earliest first-event timestamp across trips, skipping trips without events.
pub fn initial_time_for<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> i64 {
    trips
        .into_iter()
        .filter_map(Trip::first_event_ms)
        .min()
        .unwrap_or(DEFAULT_INITIAL_TIME_MS)
}

#[derive(Debug, Clone, PartialEq, Resource)]
pub struct SimulationClock {
    /// Offset from `initial_ms`, fractional so that speeds below 1x still advance every tick.
    elapsed_ms: f64,
    initial_ms: i64,
    speed: f64,
    playing: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::with_initial_time(DEFAULT_INITIAL_TIME_MS)
    }
}

impl SimulationClock {
    /// Playing clock at 1x starting at `initial_ms`.
    pub fn with_initial_time(initial_ms: i64) -> Self {
        Self {
            elapsed_ms: 0.0,
            initial_ms,
            speed: 1.0,
            playing: true,
        }
    }

    /// Playing clock at 1x starting at the earliest event of `trips`.
    pub fn initialize<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> Self {
        let clock = Self::with_initial_time(initial_time_for(trips));
        info!(initial_ms = clock.initial_ms, "simulation clock initialized");
        clock
    }

    /// Builder-style speed override.
    pub fn with_speed(mut self, speed: f64) -> Result<Self, ClockError> {
        self.speed = check_speed(speed)?;
        Ok(self)
    }

    /// Current simulation time in whole Unix milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.initial_ms + self.elapsed_ms.floor() as i64
    }

    pub fn now(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.now_ms())
    }

    pub fn initial_ms(&self) -> i64 {
        self.initial_ms
    }

    /// Simulation time elapsed since the initial time.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances one tick if playing. Returns whether time moved.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed_ms += ONE_SEC_MS as f64 * self.speed;
        debug!(now_ms = self.now_ms(), speed = self.speed, "tick");
        true
    }

    /// Changes the multiplier used by the next tick. Current time is untouched.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ClockError> {
        self.speed = check_speed(speed).inspect_err(|err| warn!(%err, "speed rejected"))?;
        debug!(speed, "speed changed");
        Ok(())
    }

    /// Flips play/pause and returns the new playing state.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        debug!(playing = self.playing, "playback toggled");
        self.playing
    }

    /// Back to the initial time, playing.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
        info!(initial_ms = self.initial_ms, "simulation clock reset");
    }

    /// Recomputes the initial time for a new trip set and restarts from it.
    /// Speed and play state are kept.
    pub fn reload<'a>(&mut self, trips: impl IntoIterator<Item = &'a Trip>) {
        self.initial_ms = initial_time_for(trips);
        self.elapsed_ms = 0.0;
        info!(initial_ms = self.initial_ms, "simulation clock reloaded");
    }

    pub fn display(&self) -> ClockDisplay {
        ClockDisplay {
            current_time: self.now(),
            current_time_ms: self.now_ms(),
            speed_multiplier: self.speed,
            playing: self.playing,
        }
    }
}

/// Clock fields shown next to playback controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockDisplay {
    pub current_time: Option<DateTime<Utc>>,
    pub current_time_ms: i64,
    pub speed_multiplier: f64,
    pub playing: bool,
}
