//! Cloneable façade for issuing commands to the runtime.
//!
//! [`GameHandle`] hides channel plumbing. Mutations are sent to the game
//! worker and applied one at a time; reads are served from the latest
//! published snapshot, which only ever holds a state between operations.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use avalon_core::{
    Action, ActionResult, ExecutionOutcome, GameParams, GameResults, GameState, GameStatus,
    KnownInfo, Mode, PlayerId, PlayerView,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with one game
#[derive(Clone)]
pub struct GameHandle {
    command_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<Arc<GameState>>,
    event_bus: EventBus,
}

impl GameHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        snapshot_rx: watch::Receiver<Arc<GameState>>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            event_bus,
        }
    }

    pub(crate) fn command_tx(&self) -> &mpsc::Sender<Command> {
        &self.command_tx
    }

    /// Execute any operation and return the full outcome, delta included
    pub async fn execute(&self, action: Action) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        let outcome = reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?;
        Ok(outcome?)
    }

    pub async fn propose_team<P, I, M>(&self, leader: P, team: I) -> Result<ActionResult>
    where
        P: Into<PlayerId>,
        I: IntoIterator<Item = M>,
        M: Into<PlayerId>,
    {
        let outcome = self.execute(Action::propose_team(leader, team)).await?;
        Ok(outcome.result)
    }

    pub async fn cast_vote(&self, player: impl Into<PlayerId>, approve: bool) -> Result<ActionResult> {
        let outcome = self.execute(Action::cast_vote(player, approve)).await?;
        Ok(outcome.result)
    }

    pub async fn perform_mission_action(
        &self,
        player: impl Into<PlayerId>,
        succeed: bool,
    ) -> Result<ActionResult> {
        let outcome = self.execute(Action::perform_mission(player, succeed)).await?;
        Ok(outcome.result)
    }

    pub async fn assassinate(
        &self,
        assassin: impl Into<PlayerId>,
        target: impl Into<PlayerId>,
    ) -> Result<ActionResult> {
        let outcome = self.execute(Action::assassinate(assassin, target)).await?;
        Ok(outcome.result)
    }

    /// Query the current game state through the worker (read-only snapshot)
    ///
    /// Unlike [`Self::snapshot`], this is ordered after every command sent
    /// from this handle before it.
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Latest published state. Never blocks and never observes a half-applied
    /// operation.
    pub fn snapshot(&self) -> Arc<GameState> {
        self.snapshot_rx.borrow().clone()
    }

    pub fn current_mode(&self) -> Mode {
        self.snapshot().mode
    }

    pub fn params(&self) -> GameParams {
        self.snapshot().params()
    }

    pub fn status(&self) -> GameStatus {
        self.snapshot().status()
    }

    pub fn known_info(&self, player: &str) -> Result<KnownInfo> {
        Ok(self.snapshot().known_info(player)?)
    }

    pub fn player_view(&self, player: &str) -> Result<PlayerView> {
        Ok(self.snapshot().player_view(player)?)
    }

    pub fn results(&self) -> Result<GameResults> {
        Ok(self.snapshot().results()?)
    }

    /// Waits until the worker publishes a state newer than the last one this
    /// handle observed.
    ///
    /// Fails with [`RuntimeError::SnapshotChannelClosed`] once the worker has
    /// stopped.
    pub async fn changed(&mut self) -> Result<Arc<GameState>> {
        self.snapshot_rx
            .changed()
            .await
            .map_err(|_| RuntimeError::SnapshotChannelClosed)?;
        Ok(self.snapshot_rx.borrow_and_update().clone())
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Action execution, failures, and the result
    /// - `Topic::Ledger` - Ledger entries as they are appended
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use avalon_runtime::Topic;
    ///
    /// let mut ledger_rx = handle.subscribe(Topic::Ledger);
    /// while let Ok(event) = ledger_rx.recv().await {
    ///     // Render the new ledger line
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
