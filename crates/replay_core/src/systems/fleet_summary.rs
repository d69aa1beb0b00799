use bevy_ecs::prelude::{Query, ResMut};

use crate::ecs::TripView;
use crate::fleet::FleetSummary;

/// Rebuilds the fleet tally from scratch out of the current trip views.
pub fn fleet_summary_system(views: Query<&TripView>, mut summary: ResMut<FleetSummary>) {
    *summary = FleetSummary::from_statuses(views.iter().map(|view| view.progress.status));
}
