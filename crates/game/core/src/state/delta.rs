//! Change tracking between two states.

use bitflags::bitflags;

use crate::action::Action;
use crate::state::{GameState, LogEntry, Mode};

bitflags! {
    /// Tracks which parts of [`GameState`] changed during a transition.
    ///
    /// Each bit represents one field group.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StateFields: u16 {
        const MODE            = 1 << 0;
        const TURN            = 1 << 1;
        const TEAM            = 1 << 2;
        const VOTES           = 1 << 3;
        const MISSION_ACTIONS = 1 << 4;
        const MISSIONS        = 1 << 5;
        const REJECTS         = 1 << 6;
        const WINNER          = 1 << 7;
        const LEDGER          = 1 << 8;
    }
}

/// Minimal description of an executed action's impact on the state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: Action,
    /// Nonce the action executed at.
    pub nonce: u64,
    pub mode_before: Mode,
    pub mode_after: Mode,
    pub fields: StateFields,
    /// Ledger entries the action appended.
    pub entries: Vec<LogEntry>,
}

impl StateDelta {
    /// Creates a delta by comparing two game states field group by field group.
    pub fn from_states(action: Action, before: &GameState, after: &GameState) -> Self {
        let mut fields = StateFields::empty();
        fields.set(StateFields::MODE, before.mode != after.mode);
        fields.set(
            StateFields::TURN,
            before.turn.current_index != after.turn.current_index,
        );
        fields.set(
            StateFields::TEAM,
            before.round.proposed_team != after.round.proposed_team,
        );
        fields.set(StateFields::VOTES, before.round.votes != after.round.votes);
        fields.set(
            StateFields::MISSION_ACTIONS,
            before.round.mission_actions != after.round.mission_actions,
        );
        fields.set(
            StateFields::MISSIONS,
            before.progress.completed_missions != after.progress.completed_missions,
        );
        fields.set(
            StateFields::REJECTS,
            before.progress.consecutive_rejects != after.progress.consecutive_rejects,
        );
        fields.set(StateFields::WINNER, before.winner != after.winner);
        fields.set(StateFields::LEDGER, before.ledger.len() != after.ledger.len());

        Self {
            action,
            nonce: before.nonce,
            mode_before: before.mode,
            mode_after: after.mode,
            fields,
            entries: after.ledger.since(before.ledger.len()).to_vec(),
        }
    }

    /// Returns true if no state changes occurred.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn ended_game(&self) -> bool {
        !self.mode_before.is_terminal() && self.mode_after.is_terminal()
    }
}
