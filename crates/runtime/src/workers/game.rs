//! Game worker that owns the authoritative [`avalon_core::GameState`].
//!
//! Receives commands from [`crate::GameHandle`], executes actions via
//! [`avalon_core::GameEngine`], publishes the new snapshot on a watch channel,
//! and publishes events to the EventBus. Commands are handled one at a time,
//! which is what makes every mutation exclusive.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use avalon_core::{
    Action, ExecuteError, ExecutionOutcome, GameEngine, GameError, GameState, TransitionPhase,
};

use crate::events::{Event, EventBus, GameStateEvent, LedgerEvent};

/// Commands that can be sent to the game worker
pub enum Command {
    /// Execute one player operation.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome, ExecuteError>>,
    },
    /// Query the current game state (read-only), ordered with mutations.
    QueryState { reply: oneshot::Sender<GameState> },
    /// Stop after the commands already queued.
    Shutdown,
}

/// Background task that processes gameplay commands.
pub struct GameWorker {
    state: GameState,
    command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<Arc<GameState>>,
    event_bus: EventBus,
}

impl GameWorker {
    /// Creates a new game worker.
    pub fn new(
        state: GameState,
        command_rx: mpsc::Receiver<Command>,
        snapshot_tx: watch::Sender<Arc<GameState>>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            players = state.player_count(),
            seed = state.game_seed,
            first_leader = ?state.turn.current_player(),
            "GameWorker initialized"
        );

        Self {
            state,
            command_rx,
            snapshot_tx,
            event_bus,
        }
    }

    /// Main worker loop. Ends on [`Command::Shutdown`] or once every command
    /// sender is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if matches!(cmd, Command::Shutdown) {
                        info!(target: "runtime::worker", "Shutdown command received");
                        break;
                    }
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "GameWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { action, reply } => {
                let result = self.execute_action(&action);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    /// Executes an action and publishes the outcome.
    ///
    /// This is the ONLY method that calls `GameEngine::execute()`.
    fn execute_action(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        let nonce = self.state.nonce;
        debug!(
            target: "runtime::worker",
            nonce,
            operation = action.operation(),
            actor = %action.actor(),
            "Executing action"
        );

        let outcome = match GameEngine::new(&mut self.state).execute(action) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.handle_execute_error(action, &error, nonce);
                return Err(error);
            }
        };

        if outcome.delta.is_empty() {
            debug!(target: "runtime::worker", nonce, "Action left the state unchanged");
        }

        self.snapshot_tx.send_replace(Arc::new(self.state.clone()));

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionExecuted {
                nonce,
                action: action.clone(),
                delta: Box::new(outcome.delta.clone()),
                result: outcome.result.clone(),
            }));

        let first_index = self
            .state
            .ledger
            .len()
            .saturating_sub(outcome.delta.entries.len());
        for (offset, entry) in outcome.delta.entries.iter().enumerate() {
            self.event_bus.publish(Event::Ledger(LedgerEvent {
                index: first_index + offset,
                entry: entry.clone(),
                line: entry.to_string(),
            }));
        }

        if outcome.delta.ended_game()
            && let (Some(winner), Some(cause)) = (self.state.winner, self.state.cause.clone())
        {
            info!(
                target: "runtime::worker",
                winner = %winner,
                cause = %cause,
                "Game ended"
            );
            self.event_bus
                .publish(Event::GameState(GameStateEvent::GameEnded { winner, cause }));
        }

        Ok(outcome)
    }

    fn handle_execute_error(&self, action: &Action, error: &ExecuteError, nonce: u64) {
        let phase = match error {
            ExecuteError::ProposeTeam(e) => Some(e.phase),
            ExecuteError::CastVote(e) => Some(e.phase),
            ExecuteError::MissionAction(e) => Some(e.phase),
            ExecuteError::Assassinate(e) => Some(e.phase),
            ExecuteError::Phase(_) | ExecuteError::IllegalTransition { .. } => None,
        };

        if error.severity().is_internal() || phase == Some(TransitionPhase::PostValidate) {
            tracing::error!(
                target: "runtime::worker",
                operation = action.operation(),
                actor = %action.actor(),
                error_code = error.error_code(),
                error = %error,
                "Action execution failed"
            );
        } else {
            warn!(
                target: "runtime::worker",
                operation = action.operation(),
                actor = %action.actor(),
                category = %error.category(),
                severity = error.severity().as_str(),
                error_code = error.error_code(),
                error = %error,
                "Action rejected"
            );
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionFailed {
                nonce,
                action: action.clone(),
                phase,
                category: error.category(),
                error_code: error.error_code().to_owned(),
                error: error.to_string(),
            }));
    }
}
