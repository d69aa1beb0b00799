//! Lifecycle status and completion percentage of a trip from its visible events.

use serde::Serialize;

use crate::event::{Event, EventType};

pub const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn label(self) -> &'static str {
        match self {
            TripStatus::NotStarted => "Not Started",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    /// Kebab-case form of [TripStatus::label], e.g. `not-started`.
    pub fn slug(self) -> &'static str {
        match self {
            TripStatus::NotStarted => "not-started",
            TripStatus::InProgress => "in-progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived status of a trip at one simulation instant.
///
/// `percent` is `None` only for cancelled trips. It is capped at 100 but has no lower bound:
/// a latest event that precedes `trip_started` yields a negative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripProgress {
    pub status: TripStatus,
    pub percent: Option<i64>,
}

impl TripProgress {
    pub const NOT_STARTED: TripProgress = TripProgress {
        status: TripStatus::NotStarted,
        percent: Some(0),
    };
    pub const COMPLETED: TripProgress = TripProgress {
        status: TripStatus::Completed,
        percent: Some(100),
    };
    pub const CANCELLED: TripProgress = TripProgress {
        status: TripStatus::Cancelled,
        percent: None,
    };
}

/// Resolves the progress of a trip from the events visible so far (in log order).
///
/// Completion beats cancellation, and both are checked by presence anywhere in the
/// visible set, so a terminal status holds for every later time. Progress is only
/// estimated once a `trip_started` event and at least one other event are visible.
pub fn resolve(events: &[Event]) -> TripProgress {
    let Some(latest) = events.last() else {
        return TripProgress::NOT_STARTED;
    };

    if has_event(events, &EventType::TripCompleted) {
        return TripProgress::COMPLETED;
    }
    if has_event(events, &EventType::TripCancelled) {
        return TripProgress::CANCELLED;
    }

    let start = events
        .iter()
        .find(|event| event.event_type == EventType::TripStarted);
    if let Some(start) = start {
        if events.len() > 1 {
            let planned_ms = start.estimated_duration_hours.unwrap_or(0.0) * MS_PER_HOUR;
            if planned_ms > 0.0 {
                let elapsed_ms = (latest.timestamp_ms() - start.timestamp_ms()) as f64;
                let percent = ((elapsed_ms / planned_ms) * 100.0).floor().min(100.0) as i64;
                return TripProgress {
                    status: TripStatus::InProgress,
                    percent: Some(percent),
                };
            }
        }
    }

    TripProgress::NOT_STARTED
}

fn has_event(events: &[Event], event_type: &EventType) -> bool {
    events.iter().any(|event| &event.event_type == event_type)
}
