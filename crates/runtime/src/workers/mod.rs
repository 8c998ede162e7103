//! Worker tasks that back the runtime orchestration.
//!
//! The game worker is the single writer for one game's state.

mod game;

pub use game::{Command, GameWorker};
