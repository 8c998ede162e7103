//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the roster, turn
//! bookkeeping, the current round, the mission track, and the ledger.
//! Transport layers clone or query this state but mutate it exclusively
//! through the engine.
mod character;
pub mod delta;
mod error;
mod ledger;
mod mode;
mod player;
mod progress;
mod round;
mod view;

pub use character::{Alignment, Character, CharacterSet};
pub use delta::{StateDelta, StateFields};
pub use error::{PhaseError, UnknownPlayerError};
pub use ledger::{GameOverCause, Ledger, LogEntry};
pub use mode::Mode;
pub use player::PlayerId;
pub use progress::{ProgressState, TurnState};
pub use round::{RoundState, Team};
pub use view::{GameParams, GameResults, GameStatus, PlayerView};

use crate::config::GameConfig;

/// One player and the character dealt to them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    pub player: PlayerId,
    pub character: Character,
}

/// Players in the order they were supplied, each with their character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    pub fn new(seats: Vec<Seat>) -> Self {
        Self { seats }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.seat(player).is_some()
    }

    pub fn seat(&self, player: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.player.as_str() == player)
    }

    pub fn character_of(&self, player: &str) -> Option<Character> {
        self.seat(player).map(|seat| seat.character)
    }

    /// Seats whose character is in `set`, in roster order.
    pub fn holding(&self, set: CharacterSet) -> impl Iterator<Item = &Seat> + '_ {
        self.seats
            .iter()
            .filter(move |seat| set.contains_character(seat.character))
    }
}

/// Canonical snapshot of one game.
///
/// Built once by [`crate::setup::GameSetup`]; afterwards only
/// [`crate::engine::GameEngine`] mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed the deal and turn order were drawn from.
    pub game_seed: u64,

    /// Count of successfully executed operations.
    pub nonce: u64,

    /// Constants derived from the player count.
    pub config: GameConfig,

    /// Character multiset in the order it was supplied (or tabled).
    pub characters: Vec<Character>,

    pub roster: Roster,
    pub turn: TurnState,
    pub round: RoundState,
    pub progress: ProgressState,
    pub mode: Mode,

    /// Set exactly when `mode` is [`Mode::Ended`].
    pub winner: Option<Alignment>,
    pub cause: Option<GameOverCause>,

    pub ledger: Ledger,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub fn is_over(&self) -> bool {
        self.mode.is_terminal()
    }

    /// Team size required for the mission being played, if any remain.
    pub fn required_team_size(&self) -> Option<usize> {
        self.config.mission_size(self.progress.current_mission())
    }

    /// Sabotages needed to fail the mission being played, if any remain.
    pub fn required_fails(&self) -> Option<usize> {
        self.config.fails_required(self.progress.current_mission())
    }

    /// Player holding the Assassin, if one was dealt.
    pub fn assassin(&self) -> Option<&PlayerId> {
        self.roster
            .holding(CharacterSet::ASSASSIN)
            .next()
            .map(|seat| &seat.player)
    }

    /// Declares the winner, enters [`Mode::Ended`], and records the result.
    pub(crate) fn conclude(&mut self, winner: Alignment, cause: GameOverCause) {
        self.winner = Some(winner);
        self.cause = Some(cause.clone());
        self.mode = Mode::Ended;
        self.ledger.push(LogEntry::GameOver { winner, cause });
    }
}
