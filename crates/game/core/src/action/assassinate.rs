use crate::action::ActionTransition;
use crate::error::{ErrorCategory, ErrorSeverity, GameError};
use crate::state::{Alignment, Character, GameOverCause, GameState, Mode, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssassinateError {
    #[error("{0} is not in this game")]
    UnknownAssassin(PlayerId),

    #[error("{0} is not the Assassin")]
    NotAssassin(PlayerId),

    #[error("target {0} is not in this game")]
    UnknownTarget(PlayerId),
}

impl GameError for AssassinateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownAssassin(_) => ErrorCategory::UnknownPlayer,
            Self::NotAssassin(_) => ErrorCategory::Role,
            Self::UnknownTarget(_) => ErrorCategory::Membership,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAssassin(_) => "ASSASSINATE_UNKNOWN_ASSASSIN",
            Self::NotAssassin(_) => "ASSASSINATE_NOT_ASSASSIN",
            Self::UnknownTarget(_) => "ASSASSINATE_UNKNOWN_TARGET",
        }
    }
}

/// The Assassin names the player they believe is Merlin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssassinateAction {
    pub assassin: PlayerId,
    pub target: PlayerId,
}

impl AssassinateAction {
    pub fn new(assassin: impl Into<PlayerId>, target: impl Into<PlayerId>) -> Self {
        Self {
            assassin: assassin.into(),
            target: target.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssassinationOutcome {
    pub target: PlayerId,
    pub target_was_merlin: bool,
    pub winner: Alignment,
}

impl ActionTransition for AssassinateAction {
    type Error = AssassinateError;
    type Result = AssassinationOutcome;

    const OPERATION: &'static str = "assassinate";
    const MODE: Mode = Mode::Assassination;

    fn actor(&self) -> &PlayerId {
        &self.assassin
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        match state.roster.character_of(self.assassin.as_str()) {
            None => return Err(AssassinateError::UnknownAssassin(self.assassin.clone())),
            Some(Character::Assassin) => {}
            Some(_) => return Err(AssassinateError::NotAssassin(self.assassin.clone())),
        }

        if !state.roster.contains(self.target.as_str()) {
            return Err(AssassinateError::UnknownTarget(self.target.clone()));
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, Self::Error> {
        let target_was_merlin =
            state.roster.character_of(self.target.as_str()) == Some(Character::Merlin);
        let target = self.target.clone();

        let (winner, cause) = if target_was_merlin {
            (
                Alignment::Evil,
                GameOverCause::MerlinAssassinated {
                    target: target.clone(),
                },
            )
        } else {
            (
                Alignment::Good,
                GameOverCause::AssassinationMissed {
                    target: target.clone(),
                },
            )
        };
        state.conclude(winner, cause);

        Ok(AssassinationOutcome {
            target,
            target_was_merlin,
            winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{five_player_game, play_mission, run};
    use crate::action::{Action, ActionResult};

    /// Five-player game already in the assassination phase.
    fn endgame() -> GameState {
        let mut state = five_player_game();
        play_mission(&mut state, &["ann", "bob"], &[]);
        play_mission(&mut state, &["ann", "bob", "cat"], &[]);
        play_mission(&mut state, &["ann", "cat"], &[]);
        assert_eq!(state.mode, Mode::Assassination);
        state
    }

    #[test]
    fn naming_merlin_wins_for_evil() {
        let mut state = endgame();
        let outcome = run(&mut state, Action::assassinate("eve", "ann")).unwrap();

        assert_eq!(state.mode, Mode::Ended);
        assert_eq!(state.winner, Some(Alignment::Evil));
        assert_eq!(
            outcome.result,
            ActionResult::Assassination(AssassinationOutcome {
                target: "ann".into(),
                target_was_merlin: true,
                winner: Alignment::Evil,
            })
        );
    }

    #[test]
    fn missing_merlin_wins_for_good() {
        let mut state = endgame();
        run(&mut state, Action::assassinate("eve", "bob")).unwrap();

        assert_eq!(state.winner, Some(Alignment::Good));
        assert_eq!(
            state.cause,
            Some(GameOverCause::AssassinationMissed {
                target: "bob".into()
            })
        );
    }

    #[test]
    fn only_the_assassin_may_strike() {
        let mut state = endgame();
        let before = state.clone();

        let err = run(&mut state, Action::assassinate("dee", "ann")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Role);

        let err = run(&mut state, Action::assassinate("zed", "ann")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::UnknownPlayer);

        let err = run(&mut state, Action::assassinate("eve", "zed")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Membership);

        assert_eq!(state, before);
    }
}
