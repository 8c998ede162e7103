//! Event types for different topics.

use avalon_core::{
    Action, ActionResult, Alignment, ErrorCategory, GameOverCause, LogEntry, StateDelta,
    engine::TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events related to game state changes (actions, failures, the result)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An action was executed with resulting state changes
    ActionExecuted {
        nonce: u64,
        action: Action,
        delta: Box<StateDelta>,
        result: ActionResult,
    },

    /// An action was rejected; the state is unchanged.
    ActionFailed {
        nonce: u64,
        action: Action,
        /// Pipeline stage that failed; `None` for mode guard rejections.
        phase: Option<TransitionPhase>,
        category: ErrorCategory,
        error_code: String,
        error: String,
    },

    /// The game reached its terminal mode.
    GameEnded {
        winner: Alignment,
        cause: GameOverCause,
    },
}

/// One ledger entry, published as it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Position of the entry in the ledger.
    pub index: usize,
    pub entry: LogEntry,
    /// Human-readable rendering of `entry`.
    pub line: String,
}
