//! Replay a seeded synthetic fleet at 60x and print the fleet summary every simulated hour.
//!
//! Run with: cargo run -p replay_core --example fleet_replay

use bevy_ecs::prelude::World;
use replay_core::clock::SimulationClock;
use replay_core::config::ReplayConfig;
use replay_core::runner::{build_replay, fleet_summary, replay_schedule, run_tick, trip_views};
use replay_core::snapshot::ReplaySnapshots;
use replay_core::test_helpers::synthetic_fleet;

fn main() {
    const NUM_TRIPS: usize = 50;
    const EVENTS_PER_TRIP: usize = 120;
    const SPEED: f64 = 60.0;
    // Six simulated hours.
    const TICKS: usize = 6 * 60;

    let mut world = World::new();
    let config = ReplayConfig::default()
        .with_initial_speed(SPEED)
        .with_snapshot_interval_ms(60 * 60 * 1000);
    let fleet = synthetic_fleet(123, NUM_TRIPS, EVENTS_PER_TRIP);
    if let Err(err) = build_replay(&mut world, fleet, &config) {
        eprintln!("failed to build replay: {err}");
        std::process::exit(1);
    }

    let mut schedule = replay_schedule();
    schedule.run(&mut world);
    for _ in 0..TICKS {
        run_tick(&mut world, &mut schedule);
    }

    println!(
        "--- Fleet replay ({} trips, {} events each, {}x, seed 123) ---",
        NUM_TRIPS, EVENTS_PER_TRIP, SPEED
    );
    let initial_ms = world.resource::<SimulationClock>().initial_ms();
    println!("Hourly snapshots:");
    for snapshot in &world.resource::<ReplaySnapshots>().snapshots {
        let s = snapshot.summary;
        println!(
            "  t={:>6} s  completed={:>3} in_progress={:>3} cancelled={:>3} not_started={:>3}",
            (snapshot.timestamp_ms - initial_ms) / 1000,
            s.completed,
            s.in_progress,
            s.cancelled,
            s.not_started,
        );
    }

    let summary = fleet_summary(&world);
    println!("\nFinal summary: {:?}", summary);
    println!("\nSample trips (first 10):");
    for view in trip_views(&mut world).iter().take(10) {
        let percent = view
            .progress
            .percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "--".to_string());
        println!(
            "  {}  {:<12} {:>5}  events={}",
            view.trip_id,
            view.progress.status.label(),
            percent,
            view.visible_events
        );
    }
}
