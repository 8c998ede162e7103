use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::PlayerId;

/// Team proposed for the current mission, in the order the leader gave it.
pub type Team = ArrayVec<PlayerId, { GameConfig::MAX_TEAM_SIZE }>;

/// Per-mission scratch state, cleared whenever a proposal is rejected or a
/// mission completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// Team awaiting a vote or executing the mission. Empty during proposal.
    pub proposed_team: Team,
    /// Latest vote per player; later votes overwrite earlier ones.
    pub votes: BTreeMap<PlayerId, bool>,
    /// Latest mission choice per team member (`true` = succeed).
    pub mission_actions: BTreeMap<PlayerId, bool>,
}

impl RoundState {
    /// Installs a new team and forgets any votes or actions of the last one.
    pub fn propose(&mut self, team: Team) {
        self.proposed_team = team;
        self.votes.clear();
        self.mission_actions.clear();
    }

    pub fn clear(&mut self) {
        self.proposed_team.clear();
        self.votes.clear();
        self.mission_actions.clear();
    }

    pub fn is_on_team(&self, player: &str) -> bool {
        self.proposed_team.iter().any(|member| member.as_str() == player)
    }

    pub fn approvals(&self) -> usize {
        self.votes.values().filter(|&&approve| approve).count()
    }

    pub fn sabotages(&self) -> usize {
        self.mission_actions
            .values()
            .filter(|&&succeed| !succeed)
            .count()
    }

    /// Players whose latest vote equals `approve`, in identifier order.
    pub fn voters(&self, approve: bool) -> Vec<PlayerId> {
        self.votes
            .iter()
            .filter(|&(_, &vote)| vote == approve)
            .map(|(player, _)| player.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(names: &[&str]) -> Team {
        names.iter().map(|&name| PlayerId::from(name)).collect()
    }

    #[test]
    fn propose_discards_previous_round() {
        let mut round = RoundState::default();
        round.votes.insert("a".into(), true);
        round.mission_actions.insert("a".into(), false);

        round.propose(team(&["a", "b"]));

        assert!(round.votes.is_empty());
        assert!(round.mission_actions.is_empty());
        assert!(round.is_on_team("b"));
        assert!(!round.is_on_team("c"));
    }

    #[test]
    fn tallies_latest_choices() {
        let mut round = RoundState::default();
        round.votes.insert("a".into(), true);
        round.votes.insert("b".into(), false);
        round.votes.insert("a".into(), false);

        assert_eq!(round.approvals(), 0);
        assert_eq!(round.voters(false), vec![PlayerId::from("a"), PlayerId::from("b")]);
    }
}
