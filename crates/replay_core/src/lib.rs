pub mod clock;
pub mod config;
pub mod ecs;
pub mod error;
pub mod event;
pub mod fleet;
pub mod loader;
pub mod location;
pub mod progress;
pub mod runner;
pub mod snapshot;
pub mod systems;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod trip;
pub mod visibility;
