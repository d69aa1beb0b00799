#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use replay_core::clock::ClockError;
use replay_core::ecs::TripView;
use replay_core::fleet::FleetSummary;
use replay_core::runner::{
    apply_control, fleet_summary, refresh, replay_schedule, run_tick, run_ticks, trip_views,
    Control,
};

/// Helper that owns a reusable `Schedule` so tests can tick and control a replay world.
pub struct ReplayRunner {
    schedule: Schedule,
}

impl Default for ReplayRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayRunner {
    /// Create a runner with the default replay schedule.
    pub fn new() -> Self {
        Self {
            schedule: replay_schedule(),
        }
    }

    /// Re-derive state at the current clock time.
    pub fn refresh(&mut self, world: &mut World) {
        refresh(world, &mut self.schedule);
    }

    /// Run a single tick (returns `true` if the clock advanced).
    pub fn tick(&mut self, world: &mut World) -> bool {
        run_tick(world, &mut self.schedule)
    }

    /// Run up to `ticks` ticks, returning how many advanced the clock.
    pub fn ticks(&mut self, world: &mut World, ticks: usize) -> usize {
        run_ticks(world, &mut self.schedule, ticks)
    }

    pub fn control(&mut self, world: &mut World, control: Control) -> Result<(), ClockError> {
        apply_control(world, &mut self.schedule, control)
    }

    pub fn summary(&self, world: &World) -> FleetSummary {
        fleet_summary(world)
    }

    pub fn views(&self, world: &mut World) -> Vec<TripView> {
        trip_views(world)
    }
}
