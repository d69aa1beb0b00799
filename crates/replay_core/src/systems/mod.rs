pub mod fleet_summary;
pub mod snapshot;
pub mod trip_view;
