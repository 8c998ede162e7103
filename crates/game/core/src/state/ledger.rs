//! Append-only record of state machine events.

use core::fmt;

use crate::state::{Alignment, PlayerId, player::join_players};

/// Why the game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOverCause {
    /// Five proposals in a row were rejected.
    ConsecutiveRejections,
    /// Three missions failed.
    MissionsFailed,
    /// Three missions succeeded and no Assassin was in play.
    MissionsSucceeded,
    /// The Assassin named Merlin.
    MerlinAssassinated { target: PlayerId },
    /// The Assassin named someone other than Merlin.
    AssassinationMissed { target: PlayerId },
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConsecutiveRejections => f.write_str("five consecutive team rejections"),
            Self::MissionsFailed => f.write_str("three failed missions"),
            Self::MissionsSucceeded => f.write_str("three successful missions"),
            Self::MerlinAssassinated { target } => {
                write!(f, "the Assassin identified Merlin ({target})")
            }
            Self::AssassinationMissed { target } => {
                write!(f, "the Assassin targeted {target}, who is not Merlin")
            }
        }
    }
}

/// One ledger line. Rendered for humans through `Display`.
///
/// Missions are numbered from 1 in rendered text and stored 0-based.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogEntry {
    TeamProposed {
        leader: PlayerId,
        mission: usize,
        team: Vec<PlayerId>,
    },
    VoteApproved {
        approvers: Vec<PlayerId>,
        rejecters: Vec<PlayerId>,
    },
    VoteRejected {
        approvers: Vec<PlayerId>,
        rejecters: Vec<PlayerId>,
        consecutive_rejects: u8,
    },
    MissionCompleted {
        mission: usize,
        succeeded: bool,
        fail_count: usize,
    },
    AssassinationBegins,
    GameOver {
        winner: Alignment,
        cause: GameOverCause,
    },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamProposed {
                leader,
                mission,
                team,
            } => write!(
                f,
                "{leader} proposed {} for mission {}",
                join_players(team),
                mission + 1
            ),
            Self::VoteApproved {
                approvers,
                rejecters,
            } => {
                write!(f, "team approved by {}", join_players(approvers))?;
                if !rejecters.is_empty() {
                    write!(f, " (rejected by {})", join_players(rejecters))?;
                }
                Ok(())
            }
            Self::VoteRejected {
                approvers,
                rejecters,
                consecutive_rejects,
            } => {
                write!(f, "team rejected by {}", join_players(rejecters))?;
                if !approvers.is_empty() {
                    write!(f, " (approved by {})", join_players(approvers))?;
                }
                write!(f, "; {consecutive_rejects} consecutive rejection(s)")
            }
            Self::MissionCompleted {
                mission,
                succeeded,
                fail_count,
            } => write!(
                f,
                "mission {} {} with {fail_count} fail(s)",
                mission + 1,
                if *succeeded { "passed" } else { "failed" }
            ),
            Self::AssassinationBegins => {
                f.write_str("good completed three missions; the Assassin may now strike")
            }
            Self::GameOver { winner, cause } => {
                let team = match winner {
                    Alignment::Good => "Good",
                    Alignment::Evil => "Evil",
                };
                write!(f, "{team} wins: {cause}")
            }
        }
    }
}

/// Append-only event log. Never truncated or rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ledger {
    entries: Vec<LogEntry>,
}

impl Ledger {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended after the first `len` entries.
    pub fn since(&self, len: usize) -> &[LogEntry] {
        self.entries.get(len..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable rendering of every entry, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
