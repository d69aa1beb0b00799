use bevy_ecs::prelude::Component;
use tracing::warn;

use crate::event::Event;

/// One trip and its event log. Built once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Trip {
    id: String,
    display_name: String,
    events: Vec<Event>,
    /// Whether the log arrived in non-decreasing timestamp order.
    time_ordered: bool,
}

impl Trip {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, events: Vec<Event>) -> Self {
        let id = id.into();
        let time_ordered = events
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp);
        if !time_ordered {
            warn!(trip = %id, "event log is not in timestamp order; visibility falls back to a full scan");
        }
        Self {
            id,
            display_name: display_name.into(),
            events,
            time_ordered,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_time_ordered(&self) -> bool {
        self.time_ordered
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the first event as provided by the source, in Unix ms.
    pub fn first_event_ms(&self) -> Option<i64> {
        self.events.first().map(Event::timestamp_ms)
    }
}
