//! Deterministic rules engine for a hidden-role team game for 5–10 players.
//!
//! `avalon-core` defines the canonical rules (setup, information disclosure,
//! proposal → voting → mission → assassination transitions, ledger) and
//! exposes pure APIs that transport layers wrap. All state mutation flows
//! through [`engine::GameEngine`]; everything else is a read-only view over
//! [`GameState`].
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod rng;
pub mod setup;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, AssassinateAction, AssassinateError,
    AssassinationOutcome, CastVoteAction, MissionError, MissionOutcome, PerformMissionAction,
    ProposeError, ProposeTeamAction, VoteError, VoteOutcome,
};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError,
};
pub use error::{ErrorCategory, ErrorSeverity, GameError};
pub use knowledge::KnownInfo;
pub use rng::{FixedOrder, PcgRng, RngOracle};
pub use setup::{ConfigurationError, GameSetup};
pub use state::{
    Alignment, Character, CharacterSet, GameOverCause, GameParams, GameResults, GameState,
    GameStatus, Ledger, LogEntry, Mode, PhaseError, PlayerId, PlayerView, ProgressState,
    Roster, RoundState, Seat, StateDelta, StateFields, Team, TurnState, UnknownPlayerError,
};
