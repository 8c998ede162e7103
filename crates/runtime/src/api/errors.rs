//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and from the rules engine so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use avalon_core::{ConfigurationError, ExecuteError, GameError, PhaseError, UnknownPlayerError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("game worker command channel closed")]
    CommandChannelClosed,

    #[error("game worker snapshot channel closed")]
    SnapshotChannelClosed,

    #[error("game worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("game worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a player list or an initial state before building")]
    MissingPlayers,

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    UnknownPlayer(#[from] UnknownPlayerError),

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

impl RuntimeError {
    /// The rules-engine error behind this failure, if there is one.
    ///
    /// Channel and join failures have no game classification.
    pub fn game_error(&self) -> Option<&dyn GameError> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Execute(e) => Some(e),
            Self::UnknownPlayer(e) => Some(e),
            Self::Phase(e) => Some(e),
            Self::CommandChannelClosed
            | Self::SnapshotChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::MissingPlayers => None,
        }
    }
}
