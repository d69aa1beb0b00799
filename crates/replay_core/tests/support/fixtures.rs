#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

/// Writes `events` as a JSON array to `dir/file`.
pub fn write_trip_file(dir: &Path, file: &str, events: &Value) {
    fs::write(
        dir.join(file),
        serde_json::to_string_pretty(events).expect("encode fixture"),
    )
    .expect("write fixture");
}

/// A small data set shaped like the five dashboard fleet files.
///
/// All trips start on 2025-11-03. At 10:00Z the cross-country trip is in progress, the urban
/// trip is completed, the mountain trip is cancelled, and the southern and regional trips
/// have not started.
pub fn write_fleet_fixture(dir: &Path) {
    write_trip_file(
        dir,
        "trip1crosscountry.json",
        &json!([
            {"event_id": "cc-1", "event_type": "trip_started", "timestamp": "2025-11-03T08:00:00.000Z",
             "estimated_duration_hours": 40, "location": {"lat": 40.7128, "lng": -74.006},
             "vehicle_id": "VH-001"},
            {"event_id": "cc-2", "event_type": "location_ping", "timestamp": "2025-11-03T09:00:00.000Z",
             "location": {"lat": 40.5, "lng": -75.2},
             "movement": {"speed_kmh": 96.4, "heading_degrees": 265}},
            {"event_id": "cc-3", "event_type": "vehicle_telemetry", "timestamp": "2025-11-03T09:30:00.000Z",
             "engine_temp_c": 92},
            {"event_id": "cc-4", "event_type": "location_ping", "timestamp": "2025-11-04T08:00:00.000Z",
             "location": {"lat": 41.2, "lng": -95.9}},
            {"event_id": "cc-5", "event_type": "trip_completed", "timestamp": "2025-11-05T00:00:00.000Z",
             "location": {"lat": 34.05, "lng": -118.24}}
        ]),
    );
    write_trip_file(
        dir,
        "trip2urbandense.json",
        &json!([
            {"event_id": "ud-1", "event_type": "trip_started", "timestamp": "2025-11-03T08:15:00.000Z",
             "estimated_duration_hours": 1.5, "location": {"lat": 37.77, "lng": -122.42}},
            {"event_id": "ud-2", "event_type": "vehicle_stopped", "timestamp": "2025-11-03T08:40:00.000Z",
             "location": {"lat": 37.78, "lng": -122.41}, "movement": {"speed_kmh": 0}},
            {"event_id": "ud-3", "event_type": "trip_completed", "timestamp": "2025-11-03T09:40:00.000Z",
             "location": {"lat": 37.8, "lng": -122.4}}
        ]),
    );
    write_trip_file(
        dir,
        "trip3mountaincancelled.json",
        &json!([
            {"event_id": "mc-1", "event_type": "trip_started", "timestamp": "2025-11-03T08:30:00.000Z",
             "estimated_duration_hours": 6, "location": {"lat": 39.74, "lng": -104.99}},
            {"event_id": "mc-2", "event_type": "location_ping", "timestamp": "2025-11-03T09:00:00.000Z",
             "location": {"lat": 39.6, "lng": -105.3}},
            {"event_id": "mc-3", "event_type": "signal_lost", "timestamp": "2025-11-03T09:10:00.000Z"},
            {"event_id": "mc-4", "event_type": "trip_cancelled", "timestamp": "2025-11-03T09:45:00.000Z",
             "reason": "road_closure"}
        ]),
    );
    write_trip_file(
        dir,
        "trip4southerntechnical.json",
        &json!([
            {"event_id": "st-1", "event_type": "trip_started", "timestamp": "2025-11-03T11:00:00.000Z",
             "estimated_duration_hours": 10, "location": "unavailable"},
            {"event_id": "st-2", "event_type": "device_error", "timestamp": "2025-11-03T11:30:00.000Z",
             "movement": null}
        ]),
    );
    write_trip_file(
        dir,
        "trip5regionallogistics.json",
        &json!([
            {"event_id": "rl-1", "event_type": "location_ping", "timestamp": "2025-11-03T09:00:00.000Z",
             "location": {"lat": 33.75, "lng": -84.39}},
            {"event_id": "rl-2", "event_type": "refueling_started", "timestamp": "2025-11-03T09:20:00.000Z"}
        ]),
    );
}
