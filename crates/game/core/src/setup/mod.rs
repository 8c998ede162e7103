//! Game construction.
//!
//! [`GameSetup`] validates the player list and role list, derives the
//! [`GameConfig`] tables, then deals characters and draws the turn order as
//! two independent shuffles. It is the only way to obtain a [`GameState`].
//!
//! Without [`GameSetup::with_seed`] the seed is drawn from OS entropy, so
//! every unseeded build deals a fresh game.

mod error;

pub use error::ConfigurationError;

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::rng::{PcgRng, RngOracle, Stream, shuffle};
use crate::state::{
    Character, GameState, Ledger, Mode, PlayerId, ProgressState, Roster, RoundState, Seat,
    TurnState,
};

/// Where the character multiset comes from.
#[derive(Clone, Debug)]
enum Roles {
    /// Standard table for the player count.
    Table,
    /// Role names still to be parsed.
    Names(Vec<String>),
    Characters(Vec<Character>),
}

/// Builder for a new game.
///
/// ```
/// use avalon_core::GameSetup;
///
/// let state = GameSetup::new(["ann", "bob", "cat", "dee", "eve"])
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(state.player_count(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct GameSetup<R = PcgRng> {
    players: Vec<PlayerId>,
    roles: Roles,
    seed: Option<u64>,
    rng: R,
}

impl GameSetup<PcgRng> {
    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            roles: Roles::Table,
            seed: None,
            rng: PcgRng,
        }
    }
}

impl<R: RngOracle> GameSetup<R> {
    /// Explicit role list by name, matched case-insensitively.
    pub fn with_roles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Roles::Names(names.into_iter().map(Into::into).collect());
        self
    }

    /// Explicit, already-typed character list.
    pub fn with_characters(mut self, characters: Vec<Character>) -> Self {
        self.roles = Roles::Characters(characters);
        self
    }

    /// Fixes the seed, making the deal and turn order reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the randomness source used for the deal and the turn order.
    pub fn with_rng<O: RngOracle>(self, rng: O) -> GameSetup<O> {
        GameSetup {
            players: self.players,
            roles: self.roles,
            seed: self.seed,
            rng,
        }
    }

    /// Validates the inputs and deals a fresh game in [`Mode::Proposal`].
    ///
    /// Checks run in a fixed order: player count, duplicate players, role
    /// list length, role names. The first violation is reported.
    pub fn build(self) -> Result<GameState, ConfigurationError> {
        let count = self.players.len();
        let config = GameConfig::for_player_count(count)
            .ok_or(ConfigurationError::PlayerCount { count })?;

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = self.players.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(ConfigurationError::DuplicatePlayer(duplicate.clone()));
        }

        let characters = match self.roles {
            Roles::Table => GameConfig::default_characters(count)
                .ok_or(ConfigurationError::PlayerCount { count })?
                .to_vec(),
            Roles::Names(names) => {
                check_role_count(count, names.len())?;
                names
                    .iter()
                    .map(|name| {
                        Character::from_str(name.trim())
                            .map_err(|_| ConfigurationError::UnknownCharacter(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            Roles::Characters(characters) => {
                check_role_count(count, characters.len())?;
                characters
            }
        };

        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        let mut deal = characters.clone();
        shuffle(&self.rng, seed, Stream::Deal, &mut deal);
        let seats = self
            .players
            .iter()
            .cloned()
            .zip(deal)
            .map(|(player, character)| Seat { player, character })
            .collect();

        let mut order = self.players;
        shuffle(&self.rng, seed, Stream::TurnOrder, &mut order);

        Ok(GameState {
            game_seed: seed,
            nonce: 0,
            config,
            characters,
            roster: Roster::new(seats),
            turn: TurnState::new(order),
            round: RoundState::default(),
            progress: ProgressState::default(),
            mode: Mode::Proposal,
            winner: None,
            cause: None,
            ledger: Ledger::default(),
        })
    }
}

fn check_role_count(players: usize, roles: usize) -> Result<(), ConfigurationError> {
    if players == roles {
        Ok(())
    } else {
        Err(ConfigurationError::RoleCountMismatch { players, roles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedOrder;

    const FIVE: [&str; 5] = ["ann", "bob", "cat", "dee", "eve"];

    fn sorted(mut characters: Vec<Character>) -> Vec<Character> {
        characters.sort();
        characters
    }

    #[test]
    fn builds_every_supported_player_count() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        for count in GameConfig::MIN_PLAYERS..=GameConfig::MAX_PLAYERS {
            let state = GameSetup::new(names[..count].iter().copied())
                .with_seed(count as u64)
                .build()
                .expect("valid player count");

            assert_eq!(state.roster.len(), count);
            assert_eq!(state.turn.order.len(), count);
            assert_eq!(state.mode, Mode::Proposal);
            assert_eq!(state.turn.current_index, 0);
            assert!(state.round.proposed_team.is_empty());
            assert!(state.progress.completed_missions.is_empty());

            let table = GameConfig::default_characters(count).unwrap().to_vec();
            let dealt = state.roster.seats().iter().map(|s| s.character).collect();
            assert_eq!(sorted(dealt), sorted(table.clone()));
            assert_eq!(state.params().characters, table);
        }
    }

    #[test]
    fn rejects_bad_player_counts() {
        for count in [0, 4, 11] {
            let players = (0..count).map(|i| format!("p{i}"));
            assert_eq!(
                GameSetup::new(players).build(),
                Err(ConfigurationError::PlayerCount { count })
            );
        }
    }

    #[test]
    fn rejects_duplicate_players() {
        let err = GameSetup::new(["ann", "bob", "ann", "dee", "eve"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicatePlayer("ann".into()));
    }

    #[test]
    fn rejects_role_list_of_wrong_length() {
        let err = GameSetup::new(FIVE)
            .with_roles(["Merlin", "Assassin", "Knight", "Knight"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::RoleCountMismatch {
                players: 5,
                roles: 4
            }
        );
    }

    #[test]
    fn rejects_unknown_role_names() {
        let err = GameSetup::new(FIVE)
            .with_roles(["Merlin", "Assassin", "Knight", "Knight", "Lancelot"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownCharacter("Lancelot".into()));
    }

    #[test]
    fn count_is_checked_before_duplicates_and_roles() {
        let err = GameSetup::new(["ann", "ann"])
            .with_roles(["Lancelot"])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::PlayerCount { count: 2 });
    }

    #[test]
    fn explicit_roles_round_trip_through_params() {
        let roles = ["Minion", "merlin", "KNIGHT", "Knight", "Assassin"];
        let state = GameSetup::new(FIVE)
            .with_roles(roles)
            .with_seed(3)
            .build()
            .unwrap();

        let expected = vec![
            Character::Minion,
            Character::Merlin,
            Character::Knight,
            Character::Knight,
            Character::Assassin,
        ];
        assert_eq!(state.params().characters, expected);
        let dealt = state.roster.seats().iter().map(|s| s.character).collect();
        assert_eq!(sorted(dealt), sorted(expected));
    }

    #[test]
    fn same_seed_deals_the_same_game() {
        let a = GameSetup::new(FIVE).with_seed(11).build().unwrap();
        let b = GameSetup::new(FIVE).with_seed(11).build().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_builds_draw_fresh_games() {
        let games: Vec<GameState> = (0..32)
            .map(|_| GameSetup::new(FIVE).build().unwrap())
            .collect();

        let seeds: BTreeSet<u64> = games.iter().map(|g| g.game_seed).collect();
        assert!(seeds.len() > 1);

        let deals: BTreeSet<Vec<Character>> = games
            .iter()
            .map(|g| g.roster.seats().iter().map(|s| s.character).collect())
            .collect();
        assert!(deals.len() > 1);
    }

    #[test]
    fn recorded_seed_replays_the_game() {
        let first = GameSetup::new(FIVE).build().unwrap();
        let replay = GameSetup::new(FIVE)
            .with_seed(first.game_seed)
            .build()
            .unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn fixed_order_oracle_deals_in_input_order() {
        let state = GameSetup::new(FIVE)
            .with_characters(vec![
                Character::Merlin,
                Character::Percival,
                Character::Knight,
                Character::Morgana,
                Character::Assassin,
            ])
            .with_rng(FixedOrder)
            .build()
            .unwrap();

        assert_eq!(state.roster.character_of("ann"), Some(Character::Merlin));
        assert_eq!(state.roster.character_of("eve"), Some(Character::Assassin));
        let order: Vec<_> = state.turn.order.iter().map(PlayerId::as_str).collect();
        assert_eq!(order, FIVE);
    }
}
