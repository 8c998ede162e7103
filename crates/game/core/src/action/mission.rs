use crate::action::{ActionTransition, next_leader};
use crate::config::GameConfig;
use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{Alignment, GameOverCause, GameState, LogEntry, Mode, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissionError {
    #[error("{0} is not on the mission team")]
    NotOnTeam(PlayerId),

    #[error("{0} is Good and cannot sabotage")]
    GoodCannotSabotage(PlayerId),

    #[error("mission track is already full")]
    TrackFull,
}

impl GameError for MissionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotOnTeam(_) | Self::GoodCannotSabotage(_) => ErrorSeverity::Validation,
            Self::TrackFull => ErrorSeverity::Internal,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NotOnTeam(_) => ErrorCategory::Membership,
            Self::GoodCannotSabotage(_) => ErrorCategory::Alignment,
            Self::TrackFull => ErrorCategory::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnTeam(_) => "MISSION_NOT_ON_TEAM",
            Self::GoodCannotSabotage(_) => "MISSION_GOOD_CANNOT_SABOTAGE",
            Self::TrackFull => "MISSION_TRACK_FULL",
        }
    }
}

/// A team member secretly succeeds (`true`) or sabotages the mission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformMissionAction {
    pub player: PlayerId,
    pub succeed: bool,
}

impl PerformMissionAction {
    pub fn new(player: impl Into<PlayerId>, succeed: bool) -> Self {
        Self {
            player: player.into(),
            succeed,
        }
    }
}

/// What a mission action did to the round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissionOutcome {
    /// Other team members have yet to act.
    Pending { acted: usize, team_size: usize },
    /// The last member acted and the mission was scored.
    Completed {
        mission: usize,
        succeeded: bool,
        fail_count: usize,
        /// Mode the machine moved to after win evaluation.
        next: Mode,
    },
}

impl ActionTransition for PerformMissionAction {
    type Error = MissionError;
    type Result = MissionOutcome;

    const OPERATION: &'static str = "perform_mission_action";
    const MODE: Mode = Mode::Mission;

    fn actor(&self) -> &PlayerId {
        &self.player
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if !state.round.is_on_team(self.player.as_str()) {
            return Err(MissionError::NotOnTeam(self.player.clone()));
        }

        let is_good = state
            .roster
            .character_of(self.player.as_str())
            .is_some_and(|character| character.is_good());
        if is_good && !self.succeed {
            return Err(MissionError::GoodCannotSabotage(self.player.clone()));
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, Self::Error> {
        state
            .round
            .mission_actions
            .insert(self.player.clone(), self.succeed);

        let team_size = state.round.proposed_team.len();
        let acted = state.round.mission_actions.len();
        if acted < team_size {
            return Ok(MissionOutcome::Pending { acted, team_size });
        }

        let mission = state.progress.current_mission();
        let required = state.required_fails().ok_or(MissionError::TrackFull)?;
        let fail_count = state.round.sabotages();
        let succeeded = fail_count < required;

        if !state.progress.record_mission(succeeded) {
            return Err(MissionError::TrackFull);
        }
        state.round.clear();
        state.ledger.push(LogEntry::MissionCompleted {
            mission,
            succeeded,
            fail_count,
        });

        evaluate_track(state);

        Ok(MissionOutcome::Completed {
            mission,
            succeeded,
            fail_count,
            next: state.mode,
        })
    }
}

/// Decides what follows a scored mission. Failures are checked first.
fn evaluate_track(state: &mut GameState) {
    if state.progress.failures() >= GameConfig::MISSIONS_TO_WIN {
        state.conclude(Alignment::Evil, GameOverCause::MissionsFailed);
    } else if state.progress.successes() >= GameConfig::MISSIONS_TO_WIN {
        if state.assassin().is_some() {
            state.mode = Mode::Assassination;
            state.ledger.push(LogEntry::AssassinationBegins);
        } else {
            state.conclude(Alignment::Good, GameOverCause::MissionsSucceeded);
        }
    } else {
        next_leader(state);
    }
}
