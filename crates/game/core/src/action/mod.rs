//! Player operations and the transition contract they implement.
//!
//! Each operation is a small value type (`ProposeTeamAction`,
//! `CastVoteAction`, `PerformMissionAction`, `AssassinateAction`) that
//! implements [`ActionTransition`]. The engine guards the mode, then drives
//! the three hooks in order; validation never mutates, so a failed action
//! leaves the state untouched.
//!
//! # Module Structure
//!
//! - `propose`: the leader names a team
//! - `vote`: every player approves or rejects it
//! - `mission`: team members succeed or sabotage; win evaluation
//! - `assassinate`: the Assassin's final guess

mod assassinate;
mod mission;
mod propose;
mod vote;

pub use assassinate::{AssassinateAction, AssassinateError, AssassinationOutcome};
pub use mission::{MissionError, MissionOutcome, PerformMissionAction};
pub use propose::{ProposeError, ProposeTeamAction};
pub use vote::{CastVoteAction, VoteError, VoteOutcome};

use crate::state::{GameState, Mode, PlayerId};

/// Defines how a concrete operation mutates game state.
///
/// `MODE` is checked by the engine before any hook runs, so implementations
/// may assume it holds.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Operation name used in phase errors and logs.
    const OPERATION: &'static str;

    /// The only mode this operation is valid in.
    const MODE: Mode;

    /// Returns the player performing this action.
    fn actor(&self) -> &PlayerId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// should assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Every operation a caller can submit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    ProposeTeam(ProposeTeamAction),
    CastVote(CastVoteAction),
    PerformMission(PerformMissionAction),
    Assassinate(AssassinateAction),
}

impl Action {
    pub fn propose_team<P, I, M>(leader: P, team: I) -> Self
    where
        P: Into<PlayerId>,
        I: IntoIterator<Item = M>,
        M: Into<PlayerId>,
    {
        Self::ProposeTeam(ProposeTeamAction::new(leader, team))
    }

    pub fn cast_vote(player: impl Into<PlayerId>, approve: bool) -> Self {
        Self::CastVote(CastVoteAction::new(player, approve))
    }

    pub fn perform_mission(player: impl Into<PlayerId>, succeed: bool) -> Self {
        Self::PerformMission(PerformMissionAction::new(player, succeed))
    }

    pub fn assassinate(assassin: impl Into<PlayerId>, target: impl Into<PlayerId>) -> Self {
        Self::Assassinate(AssassinateAction::new(assassin, target))
    }

    /// Returns the player performing this action.
    pub fn actor(&self) -> &PlayerId {
        match self {
            Self::ProposeTeam(action) => action.actor(),
            Self::CastVote(action) => action.actor(),
            Self::PerformMission(action) => action.actor(),
            Self::Assassinate(action) => action.actor(),
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::ProposeTeam(_) => ProposeTeamAction::OPERATION,
            Self::CastVote(_) => CastVoteAction::OPERATION,
            Self::PerformMission(_) => PerformMissionAction::OPERATION,
            Self::Assassinate(_) => AssassinateAction::OPERATION,
        }
    }

    pub fn required_mode(&self) -> Mode {
        match self {
            Self::ProposeTeam(_) => ProposeTeamAction::MODE,
            Self::CastVote(_) => CastVoteAction::MODE,
            Self::PerformMission(_) => PerformMissionAction::MODE,
            Self::Assassinate(_) => AssassinateAction::MODE,
        }
    }
}

/// Operation-specific result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    TeamProposed,
    Vote(VoteOutcome),
    Mission(MissionOutcome),
    Assassination(AssassinationOutcome),
}

/// Advances the leader and reopens proposals for the next team.
fn next_leader(state: &mut GameState) {
    state.round.clear();
    state.turn.advance();
    state.mode = Mode::Proposal;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted games shared by the action tests.

    use crate::engine::{ExecuteError, ExecutionOutcome, GameEngine};
    use crate::rng::FixedOrder;
    use crate::setup::GameSetup;
    use crate::state::{Character, GameState};

    pub const FIVE: [&str; 5] = ["ann", "bob", "cat", "dee", "eve"];

    /// ann=Merlin bob=Percival cat=Knight dee=Morgana eve=Assassin, turn
    /// order equal to seating.
    pub fn five_player_game() -> GameState {
        GameSetup::new(FIVE)
            .with_characters(vec![
                Character::Merlin,
                Character::Percival,
                Character::Knight,
                Character::Morgana,
                Character::Assassin,
            ])
            .with_rng(FixedOrder)
            .build()
            .expect("valid setup")
    }

    pub fn run(
        state: &mut GameState,
        action: crate::action::Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        GameEngine::new(state).execute(&action)
    }

    /// Proposes `team` with the current leader and has everyone vote `approve`.
    pub fn propose_and_vote(state: &mut GameState, team: &[&str], approve: bool) {
        let leader = state
            .turn
            .current_player()
            .cloned()
            .expect("turn order is never empty");
        run(
            state,
            crate::action::Action::propose_team(leader, team.iter().copied()),
        )
        .expect("proposal accepted");
        for player in FIVE {
            run(state, crate::action::Action::cast_vote(player, approve)).expect("vote accepted");
        }
    }

    /// Plays one mission with `team`, sabotaging with the listed members.
    pub fn play_mission(state: &mut GameState, team: &[&str], saboteurs: &[&str]) {
        propose_and_vote(state, team, true);
        for member in team {
            let succeed = !saboteurs.contains(member);
            run(state, crate::action::Action::perform_mission(*member, succeed))
                .expect("mission action accepted");
        }
    }
}
