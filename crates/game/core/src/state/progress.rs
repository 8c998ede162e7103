use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::PlayerId;

/// Turn order bookkeeping.
///
/// The order is a permutation of all players fixed at setup. The leader index
/// advances on a rejected vote or a completed mission, never on approval.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub order: Vec<PlayerId>,
    pub current_index: usize,
}

impl TurnState {
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self {
            order,
            current_index: 0,
        }
    }

    /// Player expected to propose the next team.
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.order.get(self.current_index)
    }

    pub fn advance(&mut self) {
        if !self.order.is_empty() {
            self.current_index = (self.current_index + 1) % self.order.len();
        }
    }
}

/// Mission track and rejection counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressState {
    /// Append-only mission results (`true` = succeeded).
    pub completed_missions: ArrayVec<bool, { GameConfig::MISSION_COUNT }>,
    /// Rejected proposals since the last approval.
    pub consecutive_rejects: u8,
}

impl ProgressState {
    /// Index of the mission currently being played.
    pub fn current_mission(&self) -> usize {
        self.completed_missions.len()
    }

    pub fn successes(&self) -> usize {
        self.completed_missions.iter().filter(|&&ok| ok).count()
    }

    pub fn failures(&self) -> usize {
        self.completed_missions.iter().filter(|&&ok| !ok).count()
    }

    /// Appends a mission result. Returns `false` when the track is full.
    pub fn record_mission(&mut self, succeeded: bool) -> bool {
        self.completed_missions.try_push(succeeded).is_ok()
    }
}
