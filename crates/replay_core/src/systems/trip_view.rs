use bevy_ecs::prelude::{Query, Res};

use crate::clock::SimulationClock;
use crate::ecs::TripView;
use crate::trip::Trip;

/// Re-derives every trip's view at the current clock time.
pub fn derive_trip_views_system(
    clock: Res<SimulationClock>,
    mut trips: Query<(&Trip, &mut TripView)>,
) {
    let now = clock.now_ms();
    for (trip, mut view) in trips.iter_mut() {
        *view = TripView::derive(trip, now);
    }
}
