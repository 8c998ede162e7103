//! Player-count dependent game constants.
use crate::state::Character;

/// Per-game constants derived once from the player count.
///
/// Immutable after setup: the engine only ever indexes these tables by the
/// number of completed missions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub player_count: usize,
    /// Required team size for each mission index.
    pub mission_sizes: [u8; GameConfig::MISSION_COUNT],
    /// Sabotage actions needed to fail each mission index.
    pub fails_required: [u8; GameConfig::MISSION_COUNT],
}

impl GameConfig {
    // ===== rule constants =====
    pub const MIN_PLAYERS: usize = 5;
    pub const MAX_PLAYERS: usize = 10;
    pub const MISSION_COUNT: usize = 5;
    /// Missions one side must win (or lose) to decide the mission track.
    pub const MISSIONS_TO_WIN: usize = 3;
    /// Consecutive rejected proposals that hand the game to Evil.
    pub const MAX_CONSECUTIVE_REJECTS: u8 = 5;
    /// Largest team any mission can require.
    pub const MAX_TEAM_SIZE: usize = 5;
    /// Mission index that needs two sabotages once the table is large enough.
    pub const DOUBLE_FAIL_MISSION: usize = 3;
    /// Smallest player count at which the double-fail mission applies.
    pub const DOUBLE_FAIL_MIN_PLAYERS: usize = 7;

    /// Builds the constants for `player_count`, or `None` outside 5..=10.
    pub fn for_player_count(player_count: usize) -> Option<Self> {
        let mission_sizes = match player_count {
            5 => [2, 3, 2, 3, 3],
            6 => [2, 3, 4, 3, 4],
            7 => [2, 3, 3, 4, 4],
            8..=10 => [3, 4, 4, 5, 5],
            _ => return None,
        };

        let mut fails_required = [1; Self::MISSION_COUNT];
        if player_count >= Self::DOUBLE_FAIL_MIN_PLAYERS {
            fails_required[Self::DOUBLE_FAIL_MISSION] = 2;
        }

        Some(Self {
            player_count,
            mission_sizes,
            fails_required,
        })
    }

    /// Team size for `mission`, or `None` once all missions are recorded.
    pub fn mission_size(&self, mission: usize) -> Option<usize> {
        self.mission_sizes.get(mission).map(|&size| size as usize)
    }

    /// Fail threshold for `mission`, or `None` once all missions are recorded.
    pub fn fails_required(&self, mission: usize) -> Option<usize> {
        self.fails_required.get(mission).map(|&fails| fails as usize)
    }

    /// Standard character table used when no explicit role list is given.
    pub fn default_characters(player_count: usize) -> Option<&'static [Character]> {
        use Character::*;

        let characters: &'static [Character] = match player_count {
            5 => &[Morgana, Assassin, Merlin, Percival, Knight],
            6 => &[Morgana, Assassin, Merlin, Percival, Knight, Knight],
            7 => &[Mordred, Morgana, Assassin, Merlin, Percival, Knight, Knight],
            8 => &[
                Mordred, Morgana, Assassin, Merlin, Percival, Knight, Knight, Knight,
            ],
            9 => &[
                Mordred, Morgana, Assassin, Merlin, Percival, Knight, Knight, Knight, Knight,
            ],
            10 => &[
                Mordred, Morgana, Assassin, Oberon, Merlin, Percival, Knight, Knight, Knight,
                Knight,
            ],
            _ => return None,
        };
        Some(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_tables_match_rulebook() {
        let expected: [(usize, [u8; 5], [u8; 5]); 6] = [
            (5, [2, 3, 2, 3, 3], [1, 1, 1, 1, 1]),
            (6, [2, 3, 4, 3, 4], [1, 1, 1, 1, 1]),
            (7, [2, 3, 3, 4, 4], [1, 1, 1, 2, 1]),
            (8, [3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
            (9, [3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
            (10, [3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
        ];

        for (count, sizes, fails) in expected {
            let config = GameConfig::for_player_count(count).unwrap();
            assert_eq!(config.mission_sizes, sizes, "mission sizes for {count}");
            assert_eq!(config.fails_required, fails, "fails required for {count}");
        }
    }

    #[test]
    fn rejects_unsupported_player_counts() {
        for count in [0, 1, 4, 11, 20] {
            assert!(GameConfig::for_player_count(count).is_none());
            assert!(GameConfig::default_characters(count).is_none());
        }
    }

    #[test]
    fn default_tables_have_one_character_per_player() {
        for count in GameConfig::MIN_PLAYERS..=GameConfig::MAX_PLAYERS {
            let characters = GameConfig::default_characters(count).unwrap();
            assert_eq!(characters.len(), count);
            assert_eq!(
                characters.iter().filter(|c| **c == Character::Assassin).count(),
                1
            );
            assert_eq!(
                characters.iter().filter(|c| **c == Character::Merlin).count(),
                1
            );
        }
    }

    #[test]
    fn lookups_past_the_last_mission_are_none() {
        let config = GameConfig::for_player_count(5).unwrap();
        assert_eq!(config.mission_size(4), Some(3));
        assert_eq!(config.mission_size(5), None);
        assert_eq!(config.fails_required(5), None);
    }
}
