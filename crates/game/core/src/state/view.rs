//! Read-only views handed to transport layers.
//!
//! Views are plain data: cloning them out of the state gives callers a
//! consistent snapshot they can serialize however they like.

use crate::config::GameConfig;
use crate::knowledge::KnownInfo;
use crate::state::{
    Alignment, Character, GameOverCause, GameState, Mode, PhaseError, PlayerId,
    UnknownPlayerError,
};

/// Static parameters fixed at setup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameParams {
    pub turn_order: Vec<PlayerId>,
    pub mission_sizes: [u8; GameConfig::MISSION_COUNT],
    pub fails_required: [u8; GameConfig::MISSION_COUNT],
    /// Character multiset in play. Says nothing about who holds what.
    pub characters: Vec<Character>,
}

/// Public, mutable progress of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStatus {
    pub mode: Mode,
    pub completed_missions: Vec<bool>,
    pub consecutive_rejects: u8,
    pub current_turn_player: Option<PlayerId>,
    pub proposed_team: Vec<PlayerId>,
    /// Team size for the mission being played.
    pub mission_size: Option<usize>,
    /// Sabotages needed to fail the mission being played.
    pub fails_required: Option<usize>,
    /// How many players have voted on the proposed team (not how).
    pub votes_cast: usize,
    /// How many team members have acted on the mission (not how).
    pub mission_actions_taken: usize,
    pub winner: Option<Alignment>,
}

/// Everything one player is entitled to see.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub player: PlayerId,
    pub known: KnownInfo,
    pub status: GameStatus,
    pub on_team: bool,
    /// This player's own vote on the current proposal, if cast.
    pub own_vote: Option<bool>,
    /// This player's own mission choice, if made.
    pub own_mission_action: Option<bool>,
}

/// Final outcome, available once the game has ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResults {
    pub winner: Alignment,
    pub cause: GameOverCause,
    /// Every player's character, in roster order.
    pub roles: Vec<(PlayerId, Character)>,
    pub log: Vec<String>,
}

impl GameState {
    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn params(&self) -> GameParams {
        GameParams {
            turn_order: self.turn.order.clone(),
            mission_sizes: self.config.mission_sizes,
            fails_required: self.config.fails_required,
            characters: self.characters.clone(),
        }
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            mode: self.mode,
            completed_missions: self.progress.completed_missions.to_vec(),
            consecutive_rejects: self.progress.consecutive_rejects,
            current_turn_player: self.turn.current_player().cloned(),
            proposed_team: self.round.proposed_team.to_vec(),
            mission_size: self.required_team_size(),
            fails_required: self.required_fails(),
            votes_cast: self.round.votes.len(),
            mission_actions_taken: self.round.mission_actions.len(),
            winner: self.winner,
        }
    }

    pub fn player_view(&self, player: &str) -> Result<PlayerView, UnknownPlayerError> {
        let known = self.known_info(player)?;
        Ok(PlayerView {
            player: PlayerId::from(player),
            known,
            status: self.status(),
            on_team: self.round.is_on_team(player),
            own_vote: self.round.votes.get(player).copied(),
            own_mission_action: self.round.mission_actions.get(player).copied(),
        })
    }

    /// Winner, every role, and the full ledger. Only once the game has ended.
    pub fn results(&self) -> Result<GameResults, PhaseError> {
        let (Some(winner), Some(cause)) = (self.winner, self.cause.clone()) else {
            return Err(PhaseError::new("results", Mode::Ended, self.mode));
        };

        Ok(GameResults {
            winner,
            cause,
            roles: self
                .roster
                .seats()
                .iter()
                .map(|seat| (seat.player.clone(), seat.character))
                .collect(),
            log: self.ledger.lines(),
        })
    }
}
