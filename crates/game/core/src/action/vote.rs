use crate::action::{ActionTransition, next_leader};
use crate::config::GameConfig;
use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{Alignment, GameOverCause, GameState, LogEntry, Mode, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoteError {
    #[error("voter {0} is not in this game")]
    UnknownVoter(PlayerId),

    #[error("{votes} votes recorded for {players} players")]
    TallyOverflow { votes: usize, players: usize },
}

impl GameError for VoteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownVoter(_) => ErrorSeverity::Validation,
            Self::TallyOverflow { .. } => ErrorSeverity::Internal,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownVoter(_) => ErrorCategory::Membership,
            Self::TallyOverflow { .. } => ErrorCategory::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVoter(_) => "VOTE_UNKNOWN_VOTER",
            Self::TallyOverflow { .. } => "VOTE_TALLY_OVERFLOW",
        }
    }
}

/// A player approves (`true`) or rejects the proposed team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastVoteAction {
    pub player: PlayerId,
    pub approve: bool,
}

impl CastVoteAction {
    pub fn new(player: impl Into<PlayerId>, approve: bool) -> Self {
        Self {
            player: player.into(),
            approve,
        }
    }
}

/// What a vote did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoteOutcome {
    /// Still waiting on other players.
    Pending { cast: usize, total: usize },
    /// Majority approved; the mission begins.
    Approved { approvals: usize, total: usize },
    /// Rejected (ties included); leadership passes on unless this was the
    /// fifth rejection in a row.
    Rejected {
        approvals: usize,
        total: usize,
        consecutive_rejects: u8,
    },
}

impl ActionTransition for CastVoteAction {
    type Error = VoteError;
    type Result = VoteOutcome;

    const OPERATION: &'static str = "cast_vote";
    const MODE: Mode = Mode::Voting;

    fn actor(&self) -> &PlayerId {
        &self.player
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if !state.roster.contains(self.player.as_str()) {
            return Err(VoteError::UnknownVoter(self.player.clone()));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, Self::Error> {
        state.round.votes.insert(self.player.clone(), self.approve);

        let total = state.player_count();
        let cast = state.round.votes.len();
        if cast < total {
            return Ok(VoteOutcome::Pending { cast, total });
        }

        let approvals = state.round.approvals();
        let approvers = state.round.voters(true);
        let rejecters = state.round.voters(false);

        // Strict majority; exactly half is a rejection.
        if approvals * 2 > total {
            state.progress.consecutive_rejects = 0;
            state.mode = Mode::Mission;
            state.ledger.push(LogEntry::VoteApproved {
                approvers,
                rejecters,
            });
            return Ok(VoteOutcome::Approved { approvals, total });
        }

        state.progress.consecutive_rejects = state.progress.consecutive_rejects.saturating_add(1);
        let consecutive_rejects = state.progress.consecutive_rejects;
        state.ledger.push(LogEntry::VoteRejected {
            approvers,
            rejecters,
            consecutive_rejects,
        });

        if consecutive_rejects >= GameConfig::MAX_CONSECUTIVE_REJECTS {
            state.round.clear();
            state.conclude(Alignment::Evil, GameOverCause::ConsecutiveRejections);
        } else {
            next_leader(state);
        }

        Ok(VoteOutcome::Rejected {
            approvals,
            total,
            consecutive_rejects,
        })
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let votes = state.round.votes.len();
        let players = state.player_count();
        if votes > players {
            return Err(VoteError::TallyOverflow { votes, players });
        }
        Ok(())
    }
}
