/// Phase of the state machine.
///
/// ```text
/// proposal → voting → {proposal | mission | ended}
/// mission  → {proposal | assassination | ended}
/// assassination → ended
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// The current leader picks a team.
    #[default]
    Proposal,
    /// Every player approves or rejects the proposed team.
    Voting,
    /// Team members secretly succeed or sabotage.
    Mission,
    /// Good won three missions; the Assassin guesses Merlin.
    Assassination,
    /// Terminal: a winner is set.
    Ended,
}

impl Mode {
    /// Modes reachable from `self` in a single successful operation.
    pub const fn successors(self) -> &'static [Mode] {
        match self {
            Self::Proposal => &[Self::Voting],
            // Votes and mission actions that do not complete the round keep
            // the machine where it is.
            Self::Voting => &[Self::Voting, Self::Proposal, Self::Mission, Self::Ended],
            Self::Mission => &[
                Self::Mission,
                Self::Proposal,
                Self::Assassination,
                Self::Ended,
            ],
            Self::Assassination => &[Self::Ended],
            Self::Ended => &[],
        }
    }

    /// Whether one operation may move the machine from `self` to `next`.
    pub fn can_transition_to(self, next: Mode) -> bool {
        self.successors().contains(&next)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_ended_is_terminal() {
        for mode in Mode::iter() {
            assert_eq!(mode.is_terminal(), mode.successors().is_empty());
        }
    }

    #[test]
    fn transition_table() {
        assert!(Mode::Proposal.can_transition_to(Mode::Voting));
        assert!(!Mode::Proposal.can_transition_to(Mode::Mission));
        assert!(Mode::Voting.can_transition_to(Mode::Voting));
        assert!(Mode::Voting.can_transition_to(Mode::Ended));
        assert!(!Mode::Voting.can_transition_to(Mode::Assassination));
        assert!(Mode::Mission.can_transition_to(Mode::Assassination));
        assert!(Mode::Assassination.can_transition_to(Mode::Ended));
        assert!(!Mode::Assassination.can_transition_to(Mode::Proposal));
        assert!(!Mode::Ended.can_transition_to(Mode::Ended));
    }

    #[test]
    fn renders_as_snake_case() {
        assert_eq!(Mode::Assassination.to_string(), "assassination");
        assert_eq!("ended".parse::<Mode>(), Ok(Mode::Ended));
    }
}
