use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::SimulationClock;
use crate::fleet::FleetSummary;
use crate::snapshot::{ReplaySnapshots, SnapshotConfig};

/// Appends the current fleet summary to the snapshot history. Gated by the runner's
/// snapshot interval condition.
pub fn capture_snapshot_system(
    clock: Res<SimulationClock>,
    config: Res<SnapshotConfig>,
    summary: Res<FleetSummary>,
    mut snapshots: ResMut<ReplaySnapshots>,
) {
    snapshots.record(clock.now_ms(), *summary, config.max_snapshots);
}
