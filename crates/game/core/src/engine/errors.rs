//! Error types for action execution pipeline.

use crate::action::{
    ActionTransition, AssassinateAction, CastVoteAction, PerformMissionAction, ProposeTeamAction,
};
use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{Mode, PhaseError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn category(&self) -> ErrorCategory {
        self.error.category()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced while executing an action through the game engine.
///
/// Whatever the variant, the state is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("propose team failed: {0}")]
    ProposeTeam(TransitionPhaseError<<ProposeTeamAction as ActionTransition>::Error>),

    #[error("cast vote failed: {0}")]
    CastVote(TransitionPhaseError<<CastVoteAction as ActionTransition>::Error>),

    #[error("mission action failed: {0}")]
    MissionAction(TransitionPhaseError<<PerformMissionAction as ActionTransition>::Error>),

    #[error("assassination failed: {0}")]
    Assassinate(TransitionPhaseError<<AssassinateAction as ActionTransition>::Error>),

    #[error("illegal mode transition: {from} -> {to}")]
    IllegalTransition { from: Mode, to: Mode },
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Phase(e) => e.severity(),
            Self::ProposeTeam(e) => e.severity(),
            Self::CastVote(e) => e.severity(),
            Self::MissionAction(e) => e.severity(),
            Self::Assassinate(e) => e.severity(),
            Self::IllegalTransition { .. } => ErrorSeverity::Internal,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Phase(e) => e.category(),
            Self::ProposeTeam(e) => e.category(),
            Self::CastVote(e) => e.category(),
            Self::MissionAction(e) => e.category(),
            Self::Assassinate(e) => e.category(),
            Self::IllegalTransition { .. } => ErrorCategory::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Phase(e) => e.error_code(),
            Self::ProposeTeam(e) => e.error_code(),
            Self::CastVote(e) => e.error_code(),
            Self::MissionAction(e) => e.error_code(),
            Self::Assassinate(e) => e.error_code(),
            Self::IllegalTransition { .. } => "ENGINE_ILLEGAL_TRANSITION",
        }
    }
}
