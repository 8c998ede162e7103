//! Hot-seat prompt: reads commands from stdin and drives a [`GameHandle`].
//!
//! Everyone shares one terminal, so private queries (`info`, `view`) are
//! only as private as the players make them.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, info};

use avalon_core::{
    Action, ActionResult, AssassinationOutcome, GameParams, GameStatus, KnownInfo, Mode,
    MissionOutcome, PlayerId, VoteOutcome,
};
use avalon_runtime::{Event, GameHandle, RuntimeError, Topic};

use crate::command::{Command, HELP};

pub struct Repl {
    handle: GameHandle,
    ledger_rx: broadcast::Receiver<Event>,
}

impl Repl {
    pub fn new(handle: GameHandle) -> Self {
        let ledger_rx = handle.subscribe(Topic::Ledger);
        Self { handle, ledger_rx }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("{}", render_params(&self.handle.params()));
        println!("Type 'help' for commands.\n");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", prompt(&self.handle.status()));
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    debug!(target: "client::repl", ?command, "Dispatching command");
                    self.dispatch(command).await;
                }
                Err(error) => println!("error: {error}"),
            }
        }

        info!(target: "client::repl", "Prompt closed");
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) {
        let action = match command {
            Command::Propose { leader, team } => Action::propose_team(leader, team),
            Command::Vote { player, approve } => Action::cast_vote(player, approve),
            Command::Act { player, succeed } => Action::perform_mission(player, succeed),
            Command::Assassinate { assassin, target } => Action::assassinate(assassin, target),
            query => {
                self.query(query);
                return;
            }
        };

        match self.handle.execute(action).await {
            Ok(outcome) => {
                println!("{}", describe_result(&outcome.result));
                self.print_new_ledger_lines();
            }
            Err(error) => println!("{}", describe_error(&error)),
        }
    }

    fn query(&self, command: Command) {
        let output = match command {
            Command::Info(player) => self
                .handle
                .known_info(&player)
                .map(|known| render_known(&player, &known)),
            Command::View(player) => self.handle.player_view(&player).map(|view| {
                let mut text = render_known(&player, &view.known);
                text.push('\n');
                text.push_str(&render_status(&view.status));
                if let Some(vote) = view.own_vote {
                    let choice = if vote { "approve" } else { "reject" };
                    text.push_str(&format!("\nyour vote: {choice}"));
                }
                if let Some(succeed) = view.own_mission_action {
                    let choice = if succeed { "succeed" } else { "sabotage" };
                    text.push_str(&format!("\nyour mission card: {choice}"));
                }
                text
            }),
            Command::State => Ok(render_status(&self.handle.status())),
            Command::Params => Ok(render_params(&self.handle.params())),
            Command::Results => self.handle.results().map(|results| {
                let mut text = format!("{} wins: {}", results.winner, results.cause);
                for (player, character) in &results.roles {
                    text.push_str(&format!("\n  {player}: {character}"));
                }
                text
            }),
            Command::Log => Ok(self.handle.snapshot().ledger.lines().join("\n")),
            Command::Json => {
                let document = serde_json::json!({
                    "params": self.handle.params(),
                    "status": self.handle.status(),
                });
                Ok(serde_json::to_string_pretty(&document)
                    .unwrap_or_else(|error| format!("error: {error}")))
            }
            Command::Help => Ok(HELP.to_owned()),
            Command::Propose { .. }
            | Command::Vote { .. }
            | Command::Act { .. }
            | Command::Assassinate { .. }
            | Command::Quit => return,
        };

        match output {
            Ok(text) => println!("{text}"),
            Err(error) => println!("{}", describe_error(&error)),
        }
    }

    /// Ledger events are published before the worker replies, so everything
    /// the last operation appended is already queued here.
    fn print_new_ledger_lines(&mut self) {
        loop {
            match self.ledger_rx.try_recv() {
                Ok(Event::Ledger(entry)) => println!("  > {}", entry.line),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    println!("  > ({skipped} ledger lines skipped; see 'log')");
                }
                Err(_) => break,
            }
        }
    }
}

fn prompt(status: &GameStatus) -> String {
    match (status.mode, &status.current_turn_player) {
        (Mode::Proposal, Some(leader)) => format!("[proposal, {leader} leads] > "),
        (mode, _) => format!("[{mode}] > "),
    }
}

fn join(players: &[PlayerId]) -> String {
    players
        .iter()
        .map(PlayerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_known(player: &str, known: &KnownInfo) -> String {
    let mut text = format!("{player} is {} ({})", known.character, known.alignment);
    if known.revealed.is_empty() {
        text.push_str("\nsees no one");
    } else {
        text.push_str(&format!("\nsees {}", join(&known.revealed)));
    }
    text
}

fn render_status(status: &GameStatus) -> String {
    let track: String = status
        .completed_missions
        .iter()
        .map(|&ok| if ok { 'S' } else { 'F' })
        .collect();
    let mut text = format!(
        "mode: {}\nmissions: [{track:.<5}]\nrejections in a row: {}",
        status.mode, status.consecutive_rejects
    );
    if let Some(leader) = &status.current_turn_player {
        text.push_str(&format!("\nleader: {leader}"));
    }
    if let (Some(size), Some(fails)) = (status.mission_size, status.fails_required) {
        text.push_str(&format!(
            "\nthis mission: {size} players, {fails} fail(s) to fail"
        ));
    }
    if !status.proposed_team.is_empty() {
        text.push_str(&format!("\nteam: {}", join(&status.proposed_team)));
    }
    match status.mode {
        Mode::Voting => text.push_str(&format!("\nvotes cast: {}", status.votes_cast)),
        Mode::Mission => text.push_str(&format!(
            "\nmission cards played: {}",
            status.mission_actions_taken
        )),
        _ => {}
    }
    if let Some(winner) = status.winner {
        text.push_str(&format!("\nwinner: {winner}"));
    }
    text
}

fn render_params(params: &GameParams) -> String {
    let characters = params
        .characters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "turn order: {}\nmission sizes: {:?}\nfails required: {:?}\ncharacters: {characters}",
        join(&params.turn_order),
        params.mission_sizes,
        params.fails_required
    )
}

fn describe_result(result: &ActionResult) -> String {
    match result {
        ActionResult::TeamProposed => "team proposed; everyone votes".to_owned(),
        ActionResult::Vote(VoteOutcome::Pending { cast, total }) => {
            format!("vote recorded ({cast}/{total})")
        }
        ActionResult::Vote(VoteOutcome::Approved { approvals, total }) => {
            format!("team approved {approvals}/{total}; the mission begins")
        }
        ActionResult::Vote(VoteOutcome::Rejected {
            approvals,
            total,
            consecutive_rejects,
        }) => format!(
            "team rejected {approvals}/{total}; {consecutive_rejects} rejection(s) in a row"
        ),
        ActionResult::Mission(MissionOutcome::Pending { acted, team_size }) => {
            format!("mission card played ({acted}/{team_size})")
        }
        ActionResult::Mission(MissionOutcome::Completed {
            mission,
            succeeded,
            fail_count,
            next,
        }) => format!(
            "mission {} {} with {fail_count} fail(s); now {next}",
            mission + 1,
            if *succeeded { "succeeded" } else { "failed" }
        ),
        ActionResult::Assassination(AssassinationOutcome {
            target,
            target_was_merlin,
            winner,
        }) => {
            let verdict = if *target_was_merlin { "was" } else { "was not" };
            format!("{target} {verdict} Merlin; {winner} wins")
        }
    }
}

/// Engine failures print with their category and code; the session goes on.
fn describe_error(error: &RuntimeError) -> String {
    match error.game_error() {
        Some(game_error) => format!(
            "rejected [{} / {}]: {error}",
            game_error.category(),
            game_error.error_code()
        ),
        None => format!("error: {error}"),
    }
}
