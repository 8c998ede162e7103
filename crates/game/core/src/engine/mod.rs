//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! guards the mode, drives the transition phases, checks the resulting mode
//! change against the transition table, and surfaces rich error information
//! for the runtime. Every state mutation after setup flows through
//! [`GameEngine::execute`].

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult};
use crate::state::{GameState, PhaseError, StateDelta};

/// Complete outcome of action execution.
///
/// Contains both state change metadata (delta) and action-specific results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// State change metadata (which fields changed, ledger entries added).
    pub delta: StateDelta,

    /// Operation-specific result (vote tally, mission score, ...).
    pub result: ActionResult,
}

/// Game engine that applies player operations to one game.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// An operation either completes as a whole or fails with the state left
/// exactly as it was.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// Returns `ExecutionOutcome` containing both state delta and action result.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        self.guard_mode(action)?;

        let before = self.state.clone();

        let result = match transition::execute_transition(action, self.state) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        if !before.mode.can_transition_to(self.state.mode) {
            let error = ExecuteError::IllegalTransition {
                from: before.mode,
                to: self.state.mode,
            };
            *self.state = before;
            return Err(error);
        }

        let delta = StateDelta::from_states(action.clone(), &before, self.state);

        // Increment nonce after successful execution
        self.state.nonce += 1;

        Ok(ExecutionOutcome { delta, result })
    }

    /// Rejects operations submitted in the wrong mode, including any
    /// operation once the game has ended.
    fn guard_mode(&self, action: &Action) -> Result<(), PhaseError> {
        let expected = action.required_mode();
        if self.state.mode != expected {
            return Err(PhaseError::new(
                action.operation(),
                expected,
                self.state.mode,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{five_player_game, play_mission, propose_and_vote};
    use crate::error::{ErrorCategory, GameError};
    use crate::state::{Mode, StateFields};

    #[test]
    fn wrong_mode_is_a_phase_error() {
        let mut state = five_player_game();
        let before = state.clone();

        let err = GameEngine::new(&mut state)
            .execute(&Action::cast_vote("ann", true))
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::Phase(PhaseError::new("cast_vote", Mode::Voting, Mode::Proposal))
        );
        assert_eq!(err.category(), ErrorCategory::Phase);
        assert_eq!(err.error_code(), "PHASE_WRONG_MODE");
        assert_eq!(state, before);
    }

    #[test]
    fn ended_game_rejects_every_operation() {
        let mut state = five_player_game();
        for _ in 0..5 {
            propose_and_vote(&mut state, &["ann", "bob"], false);
        }
        assert_eq!(state.mode, Mode::Ended);
        let before = state.clone();

        let attempts = [
            Action::propose_team("ann", ["ann", "bob"]),
            Action::cast_vote("ann", true),
            Action::perform_mission("ann", true),
            Action::assassinate("eve", "ann"),
        ];
        for action in &attempts {
            let err = GameEngine::new(&mut state).execute(action).unwrap_err();
            assert_eq!(err.error_code(), "PHASE_GAME_OVER");
            assert_eq!(state, before);
        }
    }

    #[test]
    fn nonce_counts_successful_operations_only() {
        let mut state = five_player_game();
        let mut engine = GameEngine::new(&mut state);
        engine
            .execute(&Action::propose_team("ann", ["ann", "bob"]))
            .unwrap();
        engine.execute(&Action::cast_vote("zed", true)).unwrap_err();
        engine.execute(&Action::cast_vote("ann", true)).unwrap();

        assert_eq!(state.nonce, 2);
    }

    #[test]
    fn delta_reports_changed_fields_and_new_entries() {
        let mut state = five_player_game();
        let outcome = GameEngine::new(&mut state)
            .execute(&Action::propose_team("ann", ["ann", "bob"]))
            .unwrap();

        let delta = outcome.delta;
        assert_eq!(delta.mode_before, Mode::Proposal);
        assert_eq!(delta.mode_after, Mode::Voting);
        assert!(delta.fields.contains(StateFields::MODE | StateFields::TEAM | StateFields::LEDGER));
        assert!(!delta.fields.contains(StateFields::TURN));
        assert_eq!(delta.entries.len(), 1);
        assert!(!delta.is_empty());
        assert!(!delta.ended_game());
    }

    #[test]
    fn repeating_a_vote_records_an_empty_delta() {
        let mut state = five_player_game();
        let mut engine = GameEngine::new(&mut state);
        engine
            .execute(&Action::propose_team("ann", ["ann", "bob"]))
            .unwrap();
        engine.execute(&Action::cast_vote("bob", false)).unwrap();

        let repeat = engine.execute(&Action::cast_vote("bob", false)).unwrap();
        assert!(repeat.delta.is_empty());
        assert_eq!(repeat.delta.mode_after, Mode::Voting);

        let changed = engine.execute(&Action::cast_vote("bob", true)).unwrap();
        assert_eq!(changed.delta.fields, StateFields::VOTES);
    }

    #[test]
    fn completing_the_track_reports_the_end() {
        let mut state = five_player_game();
        play_mission(&mut state, &["ann", "dee"], &["dee"]);
        play_mission(&mut state, &["ann", "bob", "eve"], &["eve"]);
        propose_and_vote(&mut state, &["dee", "eve"], true);
        GameEngine::new(&mut state)
            .execute(&Action::perform_mission("dee", false))
            .unwrap();

        let outcome = GameEngine::new(&mut state)
            .execute(&Action::perform_mission("eve", true))
            .unwrap();
        assert!(outcome.delta.ended_game());
        assert!(outcome.delta.fields.contains(StateFields::WINNER));
        assert_eq!(state.results().unwrap().log.len(), state.ledger.len());
    }
}
