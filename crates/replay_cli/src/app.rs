//! Playback state for the terminal driver.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use serde::Serialize;

use replay_core::clock::{ClockDisplay, ClockError};
use replay_core::config::ReplayConfig;
use replay_core::ecs::TripView;
use replay_core::fleet::FleetSummary;
use replay_core::runner::{
    advance_real_time, apply_control, build_replay, clock_display, fleet_summary, refresh,
    replay_schedule, run_tick, trip_views, Control, Ticker,
};
use replay_core::trip::Trip;

/// Everything printed for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: usize,
    pub clock: ClockDisplay,
    pub summary: FleetSummary,
    pub trips: Vec<TripView>,
}

/// A control to apply before the given tick slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledControl {
    pub slot: usize,
    pub control: Control,
}

/// Parses `SLOT:ACTION` where ACTION is `speed=<x>`, `toggle` or `reset`.
pub fn parse_scheduled_control(raw: &str) -> Result<ScheduledControl, String> {
    let (slot, action) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected SLOT:ACTION, got `{raw}`"))?;
    let slot = slot
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid slot `{slot}`: {e}"))?;
    let action = action.trim();
    let control = match action {
        "toggle" => Control::TogglePlay,
        "reset" => Control::Reset,
        _ => {
            let speed = action
                .strip_prefix("speed=")
                .ok_or_else(|| format!("unknown action `{action}`"))?;
            let speed = speed
                .parse::<f64>()
                .map_err(|e| format!("invalid speed `{speed}`: {e}"))?;
            if !(speed.is_finite() && speed > 0.0) {
                return Err(format!("speed must be positive, got `{speed}`"));
            }
            Control::SetSpeed(speed)
        }
    };
    Ok(ScheduledControl { slot, control })
}

/// Main application state for the replay driver.
pub struct ReplayApp {
    pub world: World,
    pub schedule: Schedule,
    pub ticker: Ticker,
    pub ticks_executed: usize,
    pub last_frame_instant: Option<Instant>,
}

impl ReplayApp {
    pub fn new(trips: Vec<Trip>, config: &ReplayConfig) -> Result<Self, ClockError> {
        let mut world = World::new();
        build_replay(&mut world, trips, config)?;
        let mut schedule = replay_schedule();
        refresh(&mut world, &mut schedule);
        Ok(Self {
            world,
            schedule,
            ticker: Ticker::from_millis(config.tick_interval_ms),
            ticks_executed: 0,
            last_frame_instant: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Runs one tick immediately, ignoring wall time.
    pub fn tick(&mut self) -> bool {
        let advanced = run_tick(&mut self.world, &mut self.schedule);
        if advanced {
            self.ticks_executed += 1;
        }
        advanced
    }

    /// Runs the ticks that fell due since the previous call.
    pub fn advance_by_wall_clock(&mut self) -> usize {
        let now = Instant::now();
        let elapsed = self
            .last_frame_instant
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_frame_instant = Some(now);
        let ran = advance_real_time(
            &mut self.world,
            &mut self.schedule,
            &mut self.ticker,
            elapsed,
        );
        self.ticks_executed += ran;
        ran
    }

    pub fn control(&mut self, control: Control) -> Result<(), ClockError> {
        apply_control(&mut self.world, &mut self.schedule, control)
    }

    pub fn frame(&mut self) -> Frame {
        Frame {
            tick: self.ticks_executed,
            clock: clock_display(&self.world),
            summary: fleet_summary(&self.world),
            trips: trip_views(&mut self.world),
        }
    }
}
