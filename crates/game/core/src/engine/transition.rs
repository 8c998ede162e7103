//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in [`ActionResult`].
///
/// May leave `state` partially mutated on error; the engine restores it.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::ProposeTeam(transition) => {
            drive_transition(transition, state).map_err(ExecuteError::ProposeTeam)?;
            Ok(ActionResult::TeamProposed)
        }
        Action::CastVote(transition) => {
            let outcome = drive_transition(transition, state).map_err(ExecuteError::CastVote)?;
            Ok(ActionResult::Vote(outcome))
        }
        Action::PerformMission(transition) => {
            let outcome =
                drive_transition(transition, state).map_err(ExecuteError::MissionAction)?;
            Ok(ActionResult::Mission(outcome))
        }
        Action::Assassinate(transition) => {
            let outcome = drive_transition(transition, state).map_err(ExecuteError::Assassinate)?;
            Ok(ActionResult::Assassination(outcome))
        }
    }
}
