//! Information oracle: what each character is told at the start of the game.
//!
//! Visibility is a pure function of the viewer's character, expressed as a
//! set over [`CharacterSet`]. A viewer never appears in their own revealed
//! list; the exclusion is by player, so two Minions dealt from an explicit
//! role list still see each other.

use crate::state::{Alignment, Character, CharacterSet, GameState, PlayerId, UnknownPlayerError};

/// One player's private knowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownInfo {
    pub character: Character,
    pub alignment: Alignment,
    /// Players revealed to this character, in roster order.
    pub revealed: Vec<PlayerId>,
}

impl Character {
    /// Characters whose holders are revealed to this character.
    pub fn visibility(self) -> CharacterSet {
        match self {
            Self::Merlin => CharacterSet::EVIL.difference(CharacterSet::MORDRED),
            Self::Percival => CharacterSet::MERLIN.union(CharacterSet::MORGANA),
            Self::Oberon | Self::Knight => CharacterSet::empty(),
            Self::Mordred | Self::Morgana | Self::Assassin | Self::Minion => {
                CharacterSet::EVIL.difference(CharacterSet::OBERON)
            }
        }
    }
}

impl GameState {
    pub fn known_info(&self, player: &str) -> Result<KnownInfo, UnknownPlayerError> {
        let character = self
            .roster
            .character_of(player)
            .ok_or_else(|| UnknownPlayerError(PlayerId::from(player)))?;

        let revealed = self
            .roster
            .holding(character.visibility())
            .filter(|seat| seat.player.as_str() != player)
            .map(|seat| seat.player.clone())
            .collect();

        Ok(KnownInfo {
            character,
            alignment: character.alignment(),
            revealed,
        })
    }
}
