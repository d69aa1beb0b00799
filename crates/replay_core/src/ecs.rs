//! Components attached to trip entities.
//!
//! A trip entity carries its immutable [Trip] log, a [LoadOrder] and the [TripView] derived
//! from the log at the current clock time.

use bevy_ecs::prelude::Component;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::{Event, EventType};
use crate::location::LastKnownPosition;
use crate::progress::{resolve, TripProgress};
use crate::trip::Trip;
use crate::visibility::visible_events;

/// How many of the newest visible events a view keeps.
pub const RECENT_EVENTS_LIMIT: usize = 5;

/// Position of the trip in the loaded fleet; views are reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Component)]
pub struct LoadOrder(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEvent {
    pub event_id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
}

impl From<&Event> for RecentEvent {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.event_id.clone(),
            event_type: event.event_type.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Everything a trip card shows at one simulation instant.
#[derive(Debug, Clone, PartialEq, Serialize, Component)]
pub struct TripView {
    pub trip_id: String,
    pub display_name: String,
    pub at_ms: i64,
    pub progress: TripProgress,
    pub last_position: Option<LastKnownPosition>,
    pub visible_events: usize,
    /// Newest first.
    pub recent_events: Vec<RecentEvent>,
}

impl TripView {
    pub fn derive(trip: &Trip, at_ms: i64) -> Self {
        let visible = visible_events(trip, at_ms);
        Self {
            trip_id: trip.id().to_string(),
            display_name: trip.display_name().to_string(),
            at_ms,
            progress: resolve(&visible),
            last_position: LastKnownPosition::latest(&visible),
            visible_events: visible.len(),
            recent_events: visible
                .iter()
                .rev()
                .take(RECENT_EVENTS_LIMIT)
                .map(RecentEvent::from)
                .collect(),
        }
    }
}
