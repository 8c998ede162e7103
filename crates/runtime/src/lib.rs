//! Runtime orchestration for one game.
//!
//! This crate wraps the synchronous rules engine in a single-writer actor: a
//! background task owns the authoritative [`avalon_core::GameState`] and
//! applies every mutation serially, while any number of cloned
//! [`GameHandle`]s submit commands and read consistent snapshots.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{GameHandle, Result, RuntimeError};
pub use events::{Event, EventBus, GameStateEvent, LedgerEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
