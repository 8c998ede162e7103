use std::collections::BTreeSet;

use crate::action::ActionTransition;
use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{GameState, LogEntry, Mode, PlayerId, Team};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProposeError {
    #[error("it is not {player}'s turn to propose (current leader: {leader})")]
    NotYourTurn { player: PlayerId, leader: PlayerId },

    #[error("mission needs a team of {expected}, got {actual}")]
    TeamSize { expected: usize, actual: usize },

    #[error("team member {0} is not in this game")]
    NotAPlayer(PlayerId),

    #[error("{0} appears on the team more than once")]
    DuplicateMember(PlayerId),

    #[error("all missions have already been played")]
    NoMissionRemaining,

    #[error("stored team does not match the mission size")]
    TeamDesync,
}

impl GameError for ProposeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotYourTurn { .. } => ErrorSeverity::Recoverable,
            Self::TeamSize { .. } | Self::NotAPlayer(_) | Self::DuplicateMember(_) => {
                ErrorSeverity::Validation
            }
            Self::NoMissionRemaining | Self::TeamDesync => ErrorSeverity::Internal,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NotYourTurn { .. } => ErrorCategory::Turn,
            Self::TeamSize { .. } => ErrorCategory::Size,
            Self::NotAPlayer(_) | Self::DuplicateMember(_) => ErrorCategory::Membership,
            Self::NoMissionRemaining | Self::TeamDesync => ErrorCategory::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotYourTurn { .. } => "PROPOSE_NOT_YOUR_TURN",
            Self::TeamSize { .. } => "PROPOSE_TEAM_SIZE",
            Self::NotAPlayer(_) => "PROPOSE_NOT_A_PLAYER",
            Self::DuplicateMember(_) => "PROPOSE_DUPLICATE_MEMBER",
            Self::NoMissionRemaining => "PROPOSE_NO_MISSION_REMAINING",
            Self::TeamDesync => "PROPOSE_TEAM_DESYNC",
        }
    }
}

/// The current leader names a team for the next mission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposeTeamAction {
    pub leader: PlayerId,
    /// Team members in the order the leader listed them.
    pub team: Vec<PlayerId>,
}

impl ProposeTeamAction {
    pub fn new<P, I, M>(leader: P, team: I) -> Self
    where
        P: Into<PlayerId>,
        I: IntoIterator<Item = M>,
        M: Into<PlayerId>,
    {
        Self {
            leader: leader.into(),
            team: team.into_iter().map(Into::into).collect(),
        }
    }
}

impl ActionTransition for ProposeTeamAction {
    type Error = ProposeError;
    type Result = ();

    const OPERATION: &'static str = "propose_team";
    const MODE: Mode = Mode::Proposal;

    fn actor(&self) -> &PlayerId {
        &self.leader
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let leader = state
            .turn
            .current_player()
            .ok_or(ProposeError::NoMissionRemaining)?;
        if *leader != self.leader {
            return Err(ProposeError::NotYourTurn {
                player: self.leader.clone(),
                leader: leader.clone(),
            });
        }

        let expected = state
            .required_team_size()
            .ok_or(ProposeError::NoMissionRemaining)?;
        if self.team.len() != expected {
            return Err(ProposeError::TeamSize {
                expected,
                actual: self.team.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for member in &self.team {
            if !state.roster.contains(member.as_str()) {
                return Err(ProposeError::NotAPlayer(member.clone()));
            }
            if !seen.insert(member) {
                return Err(ProposeError::DuplicateMember(member.clone()));
            }
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, Self::Error> {
        let team = Team::try_from(self.team.as_slice()).map_err(|_| ProposeError::TeamSize {
            expected: state.required_team_size().unwrap_or_default(),
            actual: self.team.len(),
        })?;

        state.round.propose(team);
        state.mode = Mode::Voting;
        state.ledger.push(LogEntry::TeamProposed {
            leader: self.leader.clone(),
            mission: state.progress.current_mission(),
            team: self.team.clone(),
        });

        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if Some(state.round.proposed_team.len()) != state.required_team_size() {
            return Err(ProposeError::TeamDesync);
        }
        Ok(())
    }
}
