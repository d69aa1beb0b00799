mod support;

use bevy_ecs::prelude::World;
use replay_core::config::ReplayConfig;
use replay_core::error::ReplayError;
use replay_core::loader::{default_manifest, load_all_trips, LoadError, TripFile};
use replay_core::progress::TripStatus;
use replay_core::runner::{build_replay, clock_display, Control};
use replay_core::test_helpers::{hours, BASE_MS};

use support::fixtures::{write_fleet_fixture, write_trip_file};
use support::schedule::ReplayRunner;

fn load_world(dir: &std::path::Path) -> Result<World, ReplayError> {
    let config = ReplayConfig::default().with_data_dir(dir);
    config.validate()?;
    let trips = load_all_trips(&config.data_dir, &config.trip_files)?;
    let mut world = World::new();
    build_replay(&mut world, trips, &config)?;
    Ok(world)
}

#[test]
fn replays_the_fleet_files_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fleet_fixture(dir.path());

    let mut world = load_world(dir.path()).expect("world");
    let mut runner = ReplayRunner::new();
    runner.refresh(&mut world);
    assert_eq!(clock_display(&world).current_time_ms, BASE_MS);

    runner
        .control(&mut world, Control::SetSpeed(3600.0))
        .expect("speed");
    runner.ticks(&mut world, 2);
    assert_eq!(clock_display(&world).current_time_ms, BASE_MS + hours(2));

    let views = runner.views(&mut world);
    let names: Vec<_> = views.iter().map(|v| v.display_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Cross-Country Long Haul",
            "Urban Dense Delivery",
            "Mountain Route (Cancelled)",
            "Southern Technical Issues",
            "Regional Logistics",
        ]
    );
    let statuses: Vec<_> = views.iter().map(|v| v.progress.status).collect();
    assert_eq!(
        statuses,
        vec![
            TripStatus::InProgress,
            TripStatus::Completed,
            TripStatus::Cancelled,
            TripStatus::NotStarted,
            TripStatus::NotStarted,
        ]
    );
    assert_eq!(views[0].progress.percent, Some(3));
    assert_eq!(views[2].progress.percent, None);

    // Cancelled trip still reports where it was last seen.
    let mountain = views[2].last_position.as_ref().expect("position");
    assert_eq!(mountain.event_id, "mc-2");

    // Regional trip has a position but no start event.
    assert!(views[4].last_position.is_some());
    assert_eq!(views[4].visible_events, 2);

    let summary = runner.summary(&world);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.not_started, 2);
}

#[test]
fn malformed_optional_fields_do_not_break_the_replay() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fleet_fixture(dir.path());

    let mut world = load_world(dir.path()).expect("world");
    let mut runner = ReplayRunner::new();
    runner
        .control(&mut world, Control::SetSpeed(3600.0))
        .expect("speed");
    runner.ticks(&mut world, 4);

    let southern = runner.views(&mut world).remove(3);
    assert_eq!(southern.progress.status, TripStatus::InProgress);
    assert_eq!(southern.progress.percent, Some(5));
    assert!(southern.last_position.is_none());
}

#[test]
fn a_single_bad_file_fails_the_whole_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fleet_fixture(dir.path());
    write_trip_file(
        dir.path(),
        "trip4southerntechnical.json",
        &serde_json::json!([{"event_id": "x", "timestamp": "2025-11-03T08:00:00Z"}]),
    );

    match load_world(dir.path()) {
        Err(ReplayError::Load(LoadError::Json { path, .. })) => {
            assert!(path.ends_with("trip4southerntechnical.json"));
        }
        Err(other) => panic!("expected decode failure, got {other}"),
        Ok(_) => panic!("expected decode failure"),
    }
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_all_trips(dir.path(), &default_manifest()).expect_err("missing files");
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("trip1crosscountry.json"));
}

#[test]
fn custom_manifest_uses_its_own_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_fleet_fixture(dir.path());
    let manifest = vec![TripFile {
        file: "trip2urbandense.json".to_string(),
        display_name: Some("Downtown Loop".to_string()),
    }];
    let trips = load_all_trips(dir.path(), &manifest).expect("trips");
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].display_name(), "Downtown Loop");
    assert_eq!(trips[0].id(), "trip2urbandense");
}
