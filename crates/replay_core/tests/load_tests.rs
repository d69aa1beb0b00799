//! Load tests for replay_core: validate replay throughput with large fleets.

use std::time::Instant;

use bevy_ecs::prelude::World;
use replay_core::config::ReplayConfig;
use replay_core::runner::{build_replay, fleet_summary, refresh, replay_schedule, run_ticks};
use replay_core::test_helpers::synthetic_fleet;

fn replay_throughput(trips: usize, events_per_trip: usize, speed: f64, ticks: usize) -> f64 {
    let mut world = World::new();
    let config = ReplayConfig::default().with_initial_speed(speed);
    build_replay(&mut world, synthetic_fleet(42, trips, events_per_trip), &config)
        .expect("valid config");
    let mut schedule = replay_schedule();
    refresh(&mut world, &mut schedule);

    let start = Instant::now();
    let ran = run_ticks(&mut world, &mut schedule, ticks);
    let duration = start.elapsed();
    assert_eq!(ran, ticks);

    let summary = fleet_summary(&world);
    assert_eq!(summary.total, trips);
    assert!(summary.is_consistent());
    ran as f64 / duration.as_secs_f64()
}

#[test]
#[ignore] // Only run explicitly: cargo test --package replay_core --test load_tests -- --ignored
fn test_sustained_load() {
    let ticks_per_sec = replay_throughput(1_000, 200, 60.0, 600);
    println!("Sustained load test: {ticks_per_sec:.0} ticks/sec over 1000 trips");
    assert!(
        ticks_per_sec > 20.0,
        "Should process >20 ticks/sec, got {ticks_per_sec:.0}"
    );
}

#[test]
#[ignore]
fn test_dense_logs() {
    // Few trips with very long logs: visibility lookups dominate
    let ticks_per_sec = replay_throughput(50, 20_000, 600.0, 300);
    println!("Dense log test: {ticks_per_sec:.0} ticks/sec over 50 trips x 20000 events");
    assert!(
        ticks_per_sec > 5.0,
        "Should process >5 ticks/sec with dense logs, got {ticks_per_sec:.0}"
    );
}
