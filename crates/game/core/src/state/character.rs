//! Characters, alignments, and character sets.

use bitflags::bitflags;

/// Team a character plays for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Alignment {
    Good,
    Evil,
}

/// Secret role dealt to each player.
///
/// Names parse case-insensitively (`"merlin"`, `"Merlin"`), and display in
/// their canonical capitalised form.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Character {
    /// Evil, hidden from Merlin.
    Mordred,
    /// Evil, appears as a Merlin candidate to Percival.
    Morgana,
    /// Evil, gets the final guess at Merlin.
    Assassin,
    /// Evil, isolated from the rest of Evil in both directions.
    Oberon,
    /// Evil, no special ability.
    Minion,
    /// Good, sees Evil except Mordred.
    Merlin,
    /// Good, sees Merlin and Morgana without telling them apart.
    Percival,
    /// Good, no special ability.
    Knight,
}

impl Character {
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Merlin | Self::Percival | Self::Knight => Alignment::Good,
            Self::Mordred | Self::Morgana | Self::Assassin | Self::Oberon | Self::Minion => {
                Alignment::Evil
            }
        }
    }

    pub const fn is_good(self) -> bool {
        matches!(self.alignment(), Alignment::Good)
    }

    /// Single-member set for this character.
    pub const fn as_set(self) -> CharacterSet {
        match self {
            Self::Mordred => CharacterSet::MORDRED,
            Self::Morgana => CharacterSet::MORGANA,
            Self::Assassin => CharacterSet::ASSASSIN,
            Self::Oberon => CharacterSet::OBERON,
            Self::Minion => CharacterSet::MINION,
            Self::Merlin => CharacterSet::MERLIN,
            Self::Percival => CharacterSet::PERCIVAL,
            Self::Knight => CharacterSet::KNIGHT,
        }
    }
}

bitflags! {
    /// Set of characters, used to express visibility rules as set algebra
    /// over the alignment groups.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CharacterSet: u8 {
        const MORDRED  = 1 << 0;
        const MORGANA  = 1 << 1;
        const ASSASSIN = 1 << 2;
        const OBERON   = 1 << 3;
        const MINION   = 1 << 4;
        const MERLIN   = 1 << 5;
        const PERCIVAL = 1 << 6;
        const KNIGHT   = 1 << 7;

        const EVIL = Self::MORDRED.bits()
            | Self::MORGANA.bits()
            | Self::ASSASSIN.bits()
            | Self::OBERON.bits()
            | Self::MINION.bits();
        const GOOD = Self::MERLIN.bits() | Self::PERCIVAL.bits() | Self::KNIGHT.bits();
    }
}

impl CharacterSet {
    pub fn contains_character(self, character: Character) -> bool {
        self.contains(character.as_set())
    }
}
