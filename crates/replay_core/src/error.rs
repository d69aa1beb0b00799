use crate::clock::ClockError;
use crate::config::ConfigError;
use crate::loader::LoadError;

/// Any failure while setting up a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Clock(#[from] ClockError),
}
