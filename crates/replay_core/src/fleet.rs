//! Fleet-wide status counts.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::progress::{resolve, TripStatus};
use crate::trip::Trip;
use crate::visibility::visible_events;

/// Trip counts per lifecycle status at one simulation instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Resource)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub cancelled: usize,
    pub not_started: usize,
}

impl FleetSummary {
    pub fn add_trip(&mut self, status: TripStatus) {
        self.total += 1;
        match status {
            TripStatus::Completed => self.completed += 1,
            TripStatus::InProgress => self.in_progress += 1,
            TripStatus::Cancelled => self.cancelled += 1,
            TripStatus::NotStarted => self.not_started += 1,
        }
    }

    pub fn from_statuses(statuses: impl IntoIterator<Item = TripStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.add_trip(status);
        }
        summary
    }

    pub fn count(&self, status: TripStatus) -> usize {
        match status {
            TripStatus::Completed => self.completed,
            TripStatus::InProgress => self.in_progress,
            TripStatus::Cancelled => self.cancelled,
            TripStatus::NotStarted => self.not_started,
        }
    }

    /// Per-status counts add up to `total`.
    pub fn is_consistent(&self) -> bool {
        self.completed + self.in_progress + self.cancelled + self.not_started == self.total
    }
}

/// Resolves every trip at `at_ms` and tallies the results. Nothing is cached between calls.
pub fn aggregate<'a>(trips: impl IntoIterator<Item = &'a Trip>, at_ms: i64) -> FleetSummary {
    FleetSummary::from_statuses(
        trips
            .into_iter()
            .map(|trip| resolve(&visible_events(trip, at_ms)).status),
    )
}
