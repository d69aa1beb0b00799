//! Rolling history of fleet summaries captured during playback.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::fleet::FleetSummary;

/// Fleet counts at a specific simulation time (Unix ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FleetSnapshot {
    pub timestamp_ms: i64,
    pub summary: FleetSummary,
}

/// Snapshot capture configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SnapshotConfig {
    /// Minimum simulation time between two captures.
    pub interval_ms: i64,
    pub max_snapshots: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            interval_ms: 15 * 60 * 1000,
            max_snapshots: 10_000,
        }
    }
}

/// Rolling snapshot buffer.
#[derive(Debug, Default, Resource)]
pub struct ReplaySnapshots {
    pub snapshots: VecDeque<FleetSnapshot>,
    pub last_snapshot_at: Option<i64>,
}

impl ReplaySnapshots {
    /// A capture is due on first use, after `interval_ms`, or when time moved backwards.
    pub fn is_due(&self, now_ms: i64, interval_ms: i64) -> bool {
        match self.last_snapshot_at {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= interval_ms,
        }
    }

    /// Records `summary` at `now_ms`. Snapshots at or after `now_ms` are dropped first, so
    /// after a reset the history only describes the replay from the reset point on.
    pub fn record(&mut self, now_ms: i64, summary: FleetSummary, max_snapshots: usize) {
        while self
            .snapshots
            .back()
            .is_some_and(|snapshot| snapshot.timestamp_ms >= now_ms)
        {
            self.snapshots.pop_back();
        }
        self.snapshots.push_back(FleetSnapshot {
            timestamp_ms: now_ms,
            summary,
        });
        self.last_snapshot_at = Some(now_ms);
        while self.snapshots.len() > max_snapshots {
            self.snapshots.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.last_snapshot_at = None;
    }

    pub fn latest(&self) -> Option<&FleetSnapshot> {
        self.snapshots.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_after_interval_or_backwards_jump() {
        let mut snapshots = ReplaySnapshots::default();
        assert!(snapshots.is_due(0, 100));
        snapshots.record(1_000, FleetSummary::default(), 10);
        assert!(!snapshots.is_due(1_050, 100));
        assert!(snapshots.is_due(1_100, 100));
        assert!(snapshots.is_due(500, 100));
    }

    #[test]
    fn record_drops_future_snapshots_and_bounds_buffer() {
        let mut snapshots = ReplaySnapshots::default();
        for t in [0, 100, 200, 300] {
            snapshots.record(t, FleetSummary::default(), 3);
        }
        assert_eq!(snapshots.snapshots.len(), 3);
        assert_eq!(snapshots.snapshots.front().map(|s| s.timestamp_ms), Some(100));

        snapshots.record(150, FleetSummary::default(), 3);
        let times: Vec<_> = snapshots.snapshots.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(times, vec![100, 150]);
        assert_eq!(snapshots.latest().map(|s| s.timestamp_ms), Some(150));

        snapshots.clear();
        assert!(snapshots.latest().is_none());
        assert!(snapshots.is_due(0, 100));
    }
}
