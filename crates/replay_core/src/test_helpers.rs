//! Test helpers for common test setup and utilities.
//!
//! Event and trip builders shared by unit tests, integration tests, benches and the
//! bundled example.

use bevy_ecs::prelude::World;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Map;

use crate::clock::{ONE_SEC_MS, DEFAULT_INITIAL_TIME_MS};
use crate::config::ReplayConfig;
use crate::event::{Event, EventType, Location, Movement};
use crate::runner::build_replay;
use crate::trip::Trip;

/// Reference instant for fixtures: 2025-11-03T08:00:00Z.
pub const BASE_MS: i64 = DEFAULT_INITIAL_TIME_MS;

pub fn minutes(n: i64) -> i64 {
    n * 60 * ONE_SEC_MS
}

pub fn hours(n: i64) -> i64 {
    minutes(n * 60)
}

/// Converts Unix milliseconds to a UTC timestamp.
///
/// # Panics
///
/// Panics if `ms` is outside chrono's representable range.
pub fn ts(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).expect("timestamp in range")
}

/// Bare event of the given type with no optional fields.
pub fn event_at(id: &str, event_type: EventType, at_ms: i64) -> Event {
    Event {
        event_id: id.to_string(),
        event_type,
        timestamp: ts(at_ms),
        location: None,
        movement: None,
        estimated_duration_hours: None,
        details: Map::new(),
    }
}

/// `trip_started` carrying a planned duration.
pub fn started_at(id: &str, at_ms: i64, estimated_duration_hours: f64) -> Event {
    Event {
        estimated_duration_hours: Some(estimated_duration_hours),
        ..event_at(id, EventType::TripStarted, at_ms)
    }
}

/// `location_ping` at the given coordinates.
pub fn ping_at(id: &str, at_ms: i64, lat: f64, lng: f64) -> Event {
    Event {
        location: Some(Location { lat, lng }),
        ..event_at(id, EventType::LocationPing, at_ms)
    }
}

pub fn trip_with(id: &str, events: Vec<Event>) -> Trip {
    Trip::new(id, id, events)
}

/// Five trips that, at `BASE_MS + 2h`, are: completed, cancelled, in progress, and two not
/// started (one silent, one whose start is still in the future).
pub fn mixed_fleet() -> Vec<Trip> {
    vec![
        trip_with(
            "completed",
            vec![
                started_at("c-start", BASE_MS, 1.0),
                ping_at("c-ping", BASE_MS + minutes(20), 40.0, -74.0),
                event_at("c-done", EventType::TripCompleted, BASE_MS + minutes(50)),
            ],
        ),
        trip_with(
            "cancelled",
            vec![
                started_at("x-start", BASE_MS + minutes(5), 4.0),
                ping_at("x-ping", BASE_MS + minutes(30), 39.7, -105.0),
                event_at("x-cancel", EventType::TripCancelled, BASE_MS + hours(1)),
            ],
        ),
        trip_with(
            "in-progress",
            vec![
                started_at("p-start", BASE_MS + minutes(10), 8.0),
                ping_at("p-ping-1", BASE_MS + hours(1), 34.0, -118.0),
                ping_at("p-ping-2", BASE_MS + hours(2), 34.5, -117.5),
                event_at("p-done", EventType::TripCompleted, BASE_MS + hours(9)),
            ],
        ),
        trip_with("silent", Vec::new()),
        trip_with(
            "later",
            vec![
                started_at("l-start", BASE_MS + hours(3), 2.0),
                ping_at("l-ping", BASE_MS + hours(4), 30.0, -97.0),
            ],
        ),
    ]
}

/// Seeded synthetic fleet: each trip starts within the first hour, pings every few
/// minutes and ends completed, cancelled or still running.
pub fn synthetic_fleet(seed: u64, trips: usize, events_per_trip: usize) -> Vec<Trip> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..trips)
        .map(|index| {
            let id = format!("trip-{index:04}");
            let mut at_ms = BASE_MS + rng.gen_range(0..minutes(60));
            let duration_hours = rng.gen_range(1.0..12.0);
            let mut events = vec![started_at(&format!("{id}-0"), at_ms, duration_hours)];
            let mut lat = rng.gen_range(25.0..49.0);
            let mut lng = rng.gen_range(-124.0..-67.0);
            for n in 1..events_per_trip.max(1) {
                at_ms += rng.gen_range(ONE_SEC_MS..minutes(5));
                lat += rng.gen_range(-0.01..0.01);
                lng += rng.gen_range(-0.01..0.01);
                let mut ping = ping_at(&format!("{id}-{n}"), at_ms, lat, lng);
                ping.movement = Some(Movement {
                    speed_kmh: Some(rng.gen_range(0.0..110.0)),
                    heading_degrees: Some(rng.gen_range(0.0..360.0)),
                });
                events.push(ping);
            }
            let ending = match rng.gen_range(0..3) {
                0 => Some(EventType::TripCompleted),
                1 => Some(EventType::TripCancelled),
                _ => None,
            };
            if let Some(ending) = ending {
                at_ms += rng.gen_range(ONE_SEC_MS..minutes(5));
                events.push(event_at(&format!("{id}-end"), ending, at_ms));
            }
            Trip::new(id.clone(), id, events)
        })
        .collect()
}

/// World with the replay resources and `trips` spawned, using the default config.
///
/// # Panics
///
/// Panics if the default config is rejected (should never happen).
pub fn create_test_world(trips: Vec<Trip>) -> World {
    let mut world = World::new();
    build_replay(&mut world, trips, &ReplayConfig::default())
        .expect("default config should be valid");
    world
}
