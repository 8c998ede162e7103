//! High-level runtime orchestrator.
//!
//! The runtime owns the game worker, wires up command/event channels, and
//! exposes a builder-based API for clients to start a game.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use avalon_core::{GameSetup, GameState, PlayerId};

use crate::api::{GameHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::workers::{Command, GameWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the deal and turn order. Drawn from OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Main runtime that hosts one game
///
/// Design: Runtime owns the worker and its join handle.
/// [`GameHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: GameHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Commands queued before this call still run. Handle clones held
    /// elsewhere get [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone if every sender was dropped.
        let _ = self.handle.command_tx().send(Command::Shutdown).await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    players: Vec<PlayerId>,
    roles: Option<Vec<String>>,
    state: Option<GameState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            players: Vec::new(),
            roles: None,
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn players<I, P>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    /// Explicit role list by name. Without one, the standard table is used.
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Provide an already dealt game, e.g. one built with a custom
    /// [`avalon_core::RngOracle`]. Players, roles, and seed are then ignored.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let initial_state = match self.state {
            Some(state) => state,
            None => {
                if self.players.is_empty() {
                    return Err(RuntimeError::MissingPlayers);
                }
                let mut setup = GameSetup::new(self.players);
                if let Some(seed) = self.config.seed {
                    setup = setup.with_seed(seed);
                }
                if let Some(roles) = self.roles {
                    setup = setup.with_roles(roles);
                }
                setup.build()?
            }
        };

        info!(
            target: "runtime",
            players = initial_state.player_count(),
            seed = initial_state.game_seed,
            "Starting game"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial_state.clone()));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = GameHandle::new(command_tx, snapshot_rx, event_bus.clone());

        let worker = GameWorker::new(initial_state, command_rx, snapshot_tx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
