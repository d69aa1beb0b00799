//! Which events of a trip have happened by a given simulation time.

use std::borrow::Cow;

use crate::event::Event;
use crate::trip::Trip;

/// Events with timestamp <= `at_ms`, in log order.
///
/// Time-ordered logs are cut with a binary search and borrowed. A log that arrived out of
/// order is filtered event by event, so the result always matches a plain filter.
pub fn visible_events(trip: &Trip, at_ms: i64) -> Cow<'_, [Event]> {
    if trip.is_time_ordered() {
        Cow::Borrowed(visible_prefix(trip.events(), at_ms))
    } else {
        Cow::Owned(
            trip.events()
                .iter()
                .filter(|event| event.timestamp_ms() <= at_ms)
                .cloned()
                .collect(),
        )
    }
}

/// Number of visible events without materialising them.
pub fn visible_count(trip: &Trip, at_ms: i64) -> usize {
    if trip.is_time_ordered() {
        visible_prefix(trip.events(), at_ms).len()
    } else {
        trip.events()
            .iter()
            .filter(|event| event.timestamp_ms() <= at_ms)
            .count()
    }
}

/// Visible prefix of a log already known to be in non-decreasing timestamp order.
pub fn visible_prefix(events: &[Event], at_ms: i64) -> &[Event] {
    let end = events.partition_point(|event| event.timestamp_ms() <= at_ms);
    &events[..end]
}
