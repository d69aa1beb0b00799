//! Replay runner: advances the clock and recomputes derived state in the ECS.
//!
//! Clock mutation happens here, outside systems. Every change of simulation time is
//! followed by one run of [replay_schedule], which re-derives trip views, the fleet summary
//! and (when due) a snapshot from scratch.

use std::time::Duration;

use bevy_ecs::prelude::{Entity, Res, Schedule, With, World};
use bevy_ecs::schedule::IntoSystemConfigs;
use tracing::info;

use crate::clock::{ClockDisplay, ClockError, SimulationClock};
use crate::config::ReplayConfig;
use crate::ecs::{LoadOrder, TripView};
use crate::fleet::{aggregate, FleetSummary};
use crate::snapshot::{ReplaySnapshots, SnapshotConfig};
use crate::systems::{
    fleet_summary::fleet_summary_system, snapshot::capture_snapshot_system,
    trip_view::derive_trip_views_system,
};
use crate::trip::Trip;

/// Playback controls exposed to a UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    SetSpeed(f64),
    TogglePlay,
    Reset,
}

/// Condition: snapshot interval has elapsed (or time moved backwards).
fn should_capture_snapshot(
    clock: Option<Res<SimulationClock>>,
    config: Option<Res<SnapshotConfig>>,
    snapshots: Option<Res<ReplaySnapshots>>,
) -> bool {
    let (Some(clock), Some(config), Some(snapshots)) = (clock, config, snapshots) else {
        return false;
    };
    snapshots.is_due(clock.now_ms(), config.interval_ms)
}

/// Builds the derivation schedule: trip views, then the fleet summary, then snapshots.
pub fn replay_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            derive_trip_views_system,
            fleet_summary_system,
            capture_snapshot_system.run_if(should_capture_snapshot),
        )
            .chain(),
    );
    schedule
}

/// Inserts the replay resources and spawns one entity per trip, with views and summary
/// already derived at the initial time.
pub fn build_replay(
    world: &mut World,
    trips: Vec<Trip>,
    config: &ReplayConfig,
) -> Result<(), ClockError> {
    let clock = SimulationClock::initialize(&trips).with_speed(config.initial_speed)?;
    world.insert_resource(clock);
    world.insert_resource(SnapshotConfig {
        interval_ms: config.snapshot_interval_ms,
        max_snapshots: config.max_snapshots,
    });
    world.insert_resource(ReplaySnapshots::default());
    spawn_trips(world, trips);
    Ok(())
}

fn spawn_trips(world: &mut World, trips: Vec<Trip>) {
    let now = world.resource::<SimulationClock>().now_ms();
    world.insert_resource(aggregate(&trips, now));
    info!(trips = trips.len(), "spawning trips");
    for (index, trip) in trips.into_iter().enumerate() {
        let view = TripView::derive(&trip, now);
        world.spawn((trip, view, LoadOrder(index)));
    }
}

/// Replaces the loaded fleet. The clock restarts from the new fleet's initial time and the
/// snapshot history is dropped.
pub fn reload_trips(world: &mut World, schedule: &mut Schedule, trips: Vec<Trip>) {
    let existing: Vec<Entity> = world
        .query_filtered::<Entity, With<Trip>>()
        .iter(world)
        .collect();
    for entity in existing {
        world.despawn(entity);
    }
    world.resource_mut::<SimulationClock>().reload(&trips);
    world.resource_mut::<ReplaySnapshots>().clear();
    spawn_trips(world, trips);
    schedule.run(world);
}

/// Recomputes derived state without moving the clock.
pub fn refresh(world: &mut World, schedule: &mut Schedule) {
    schedule.run(world);
}

/// Runs one tick: advances the clock if playing, then re-derives state.
/// Returns `false` (and derives nothing) while paused.
pub fn run_tick(world: &mut World, schedule: &mut Schedule) -> bool {
    if !world.resource_mut::<SimulationClock>().tick() {
        return false;
    }
    schedule.run(world);
    true
}

/// Runs up to `ticks` ticks. Returns the number that advanced the clock.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: usize) -> usize {
    let mut advanced = 0;
    for _ in 0..ticks {
        if !run_tick(world, schedule) {
            break;
        }
        advanced += 1;
    }
    advanced
}

/// Applies a playback control. Speed and play changes only affect later ticks; a reset
/// moves time back and re-derives immediately.
pub fn apply_control(
    world: &mut World,
    schedule: &mut Schedule,
    control: Control,
) -> Result<(), ClockError> {
    match control {
        Control::SetSpeed(speed) => world.resource_mut::<SimulationClock>().set_speed(speed)?,
        Control::TogglePlay => {
            world.resource_mut::<SimulationClock>().toggle_play();
        }
        Control::Reset => {
            world.resource_mut::<SimulationClock>().reset();
            schedule.run(world);
        }
    }
    Ok(())
}

/// Turns elapsed real time into whole ticks of a fixed interval, carrying the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    pending: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            due += 1;
        }
        due
    }
}

/// Feeds elapsed real time to `ticker` and runs the ticks that fall due.
pub fn advance_real_time(
    world: &mut World,
    schedule: &mut Schedule,
    ticker: &mut Ticker,
    elapsed: Duration,
) -> usize {
    let due = ticker.advance(elapsed);
    let mut ran = 0;
    for _ in 0..due {
        if !run_tick(world, schedule) {
            break;
        }
        ran += 1;
    }
    ran
}

pub fn clock_display(world: &World) -> ClockDisplay {
    world.resource::<SimulationClock>().display()
}

pub fn fleet_summary(world: &World) -> FleetSummary {
    *world.resource::<FleetSummary>()
}

/// Current trip views in load order.
pub fn trip_views(world: &mut World) -> Vec<TripView> {
    let mut rows: Vec<(LoadOrder, TripView)> = world
        .query::<(&LoadOrder, &TripView)>()
        .iter(world)
        .map(|(order, view)| (*order, view.clone()))
        .collect();
    rows.sort_by_key(|(order, _)| *order);
    rows.into_iter().map(|(_, view)| view).collect()
}
