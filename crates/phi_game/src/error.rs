//! Game error types

use phi_engine::config::ConfigError;
use phi_engine::physics::VolumeId;
use thiserror::Error;

/// Errors raised while building or loading the game
#[derive(Error, Debug)]
pub enum GameError {
    /// Tuning config could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Level layout could not be loaded or is malformed
    #[error("Level error: {0}")]
    Level(String),

    /// The controller was attached to a handle the registry does not know
    #[error("Player volume {0} is not registered")]
    PlayerNotRegistered(VolumeId),
}

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;
