//! Line commands understood by the hot-seat prompt.

use thiserror::Error;

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Propose { leader: String, team: Vec<String> },
    Vote { player: String, approve: bool },
    Act { player: String, succeed: bool },
    Assassinate { assassin: String, target: String },
    Info(String),
    View(String),
    State,
    Params,
    Results,
    Log,
    Json,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}' takes no more than {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },

    #[error("expected {expected}, got '{value}'")]
    InvalidChoice {
        value: String,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
commands:
  propose <leader> <member>...        propose a team for the current mission
  vote <player> yes|no                approve or reject the proposed team
  act <player> succeed|sabotage       play a mission card
  assassinate <assassin> <target>     name Merlin
  info <player>                       what <player> knows (private)
  view <player>                       full view for <player> (private)
  state                               public game status
  params                              turn order, mission sizes, characters
  results                             winner and roles (once the game is over)
  log                                 ledger so far
  json                                status and params as JSON
  help                                this text
  quit                                leave";

impl Command {
    /// Parses a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "propose" => {
                let (leader, team) = args.split_first().ok_or(ParseError::MissingArgument {
                    command: "propose",
                    argument: "a leader",
                })?;
                if team.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "propose",
                        argument: "at least one team member",
                    });
                }
                Self::Propose {
                    leader: (*leader).to_owned(),
                    team: team.iter().map(|&member| member.to_owned()).collect(),
                }
            }
            "vote" => {
                let [player, choice] = exactly::<2>("vote", &args, "a player and yes|no")?;
                Self::Vote {
                    player: player.to_owned(),
                    approve: choice_of(
                        choice,
                        &["yes", "y", "approve"],
                        &["no", "n", "reject"],
                        "yes or no",
                    )?,
                }
            }
            "act" => {
                let [player, choice] =
                    exactly::<2>("act", &args, "a player and succeed|sabotage")?;
                Self::Act {
                    player: player.to_owned(),
                    succeed: choice_of(
                        choice,
                        &["succeed", "success", "s"],
                        &["sabotage", "fail", "f"],
                        "succeed or sabotage",
                    )?,
                }
            }
            "assassinate" => {
                let [assassin, target] =
                    exactly::<2>("assassinate", &args, "an assassin and a target")?;
                Self::Assassinate {
                    assassin: assassin.to_owned(),
                    target: target.to_owned(),
                }
            }
            "info" => {
                let [player] = exactly::<1>("info", &args, "a player")?;
                Self::Info(player.to_owned())
            }
            "view" => {
                let [player] = exactly::<1>("view", &args, "a player")?;
                Self::View(player.to_owned())
            }
            "state" | "status" => no_args("state", &args, Self::State)?,
            "params" => no_args("params", &args, Self::Params)?,
            "results" => no_args("results", &args, Self::Results)?,
            "log" => no_args("log", &args, Self::Log)?,
            "json" => no_args("json", &args, Self::Json)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(ParseError::UnknownCommand(head.to_owned())),
        };

        Ok(Some(command))
    }
}

fn exactly<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
    argument: &'static str,
) -> Result<[&'a str; N], ParseError> {
    if args.len() > N {
        return Err(ParseError::TooManyArguments { command, max: N });
    }
    <[&str; N]>::try_from(args).map_err(|_| ParseError::MissingArgument { command, argument })
}

fn no_args(command: &'static str, args: &[&str], parsed: Command) -> Result<Command, ParseError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::TooManyArguments { command, max: 0 })
    }
}

fn choice_of(
    value: &str,
    yes: &[&str],
    no: &[&str],
    expected: &'static str,
) -> Result<bool, ParseError> {
    let lowered = value.to_ascii_lowercase();
    if yes.contains(&lowered.as_str()) {
        Ok(true)
    } else if no.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(ParseError::InvalidChoice {
            value: value.to_owned(),
            expected,
        })
    }
}
