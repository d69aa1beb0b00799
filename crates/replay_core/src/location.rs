use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;

/// Most recent visible event that carries a location, if any.
pub fn last_location(events: &[Event]) -> Option<&Event> {
    events.iter().rev().find(|event| event.location.is_some())
}

/// Position readout taken from the last located event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastKnownPosition {
    pub event_id: String,
    pub recorded_at: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub speed_kmh: Option<f64>,
    pub heading_degrees: Option<f64>,
}

impl LastKnownPosition {
    pub fn from_event(event: &Event) -> Option<Self> {
        let location = event.location?;
        let movement = event.movement.unwrap_or_default();
        Some(Self {
            event_id: event.event_id.clone(),
            recorded_at: event.timestamp,
            lat: location.lat,
            lng: location.lng,
            speed_kmh: movement.speed_kmh,
            heading_degrees: movement.heading_degrees,
        })
    }

    pub fn latest(events: &[Event]) -> Option<Self> {
        last_location(events).and_then(Self::from_event)
    }
}
