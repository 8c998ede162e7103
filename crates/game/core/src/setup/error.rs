use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Construction input that cannot produce a game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigurationError {
    #[error("a game needs 5 to 10 players, got {count}")]
    PlayerCount { count: usize },

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("{roles} roles supplied for {players} players")]
    RoleCountMismatch { players: usize, roles: usize },

    #[error("unrecognised role name {0:?}")]
    UnknownCharacter(String),
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerCount { .. } => "SETUP_PLAYER_COUNT",
            Self::DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            Self::RoleCountMismatch { .. } => "SETUP_ROLE_COUNT_MISMATCH",
            Self::UnknownCharacter(_) => "SETUP_UNKNOWN_CHARACTER",
        }
    }
}
