//! Errors raised by read-only queries and by the mode guard.

use std::borrow::Cow;

use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{Mode, PlayerId};

/// An operation or query was attempted in the wrong mode.
///
/// Callers should re-render the current state rather than retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{operation} requires mode {expected}, but the game is in {actual}")]
pub struct PhaseError {
    /// Operation or query name, e.g. `cast_vote` or `results`.
    pub operation: Cow<'static, str>,
    pub expected: Mode,
    pub actual: Mode,
}

impl PhaseError {
    pub fn new(operation: impl Into<Cow<'static, str>>, expected: Mode, actual: Mode) -> Self {
        Self {
            operation: operation.into(),
            expected,
            actual,
        }
    }
}

impl GameError for PhaseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Phase
    }

    fn error_code(&self) -> &'static str {
        if self.actual.is_terminal() {
            "PHASE_GAME_OVER"
        } else {
            "PHASE_WRONG_MODE"
        }
    }
}

/// A query named a player that is not part of the game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("player {0} is not in this game")]
pub struct UnknownPlayerError(pub PlayerId);

impl GameError for UnknownPlayerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::UnknownPlayer
    }

    fn error_code(&self) -> &'static str {
        "QUERY_UNKNOWN_PLAYER"
    }
}
