//! Hot-seat terminal client.
//!
//! Composition root: loads configuration, installs file logging, starts a
//! [`Runtime`] for one game, and hands its [`avalon_runtime::GameHandle`] to
//! the prompt.
//!
//! ```bash
//! cargo run -p avalon-client -- ann bob cat dee eve
//! AVALON_ROLES=merlin,percival,knight,morgana,assassin AVALON_SEED=7 \
//!     cargo run -p avalon-client -- ann bob cat dee eve
//! ```
mod command;
mod config;
mod logging;
mod repl;

use anyhow::{Context, Result, bail};
use avalon_runtime::Runtime;

use config::ClientConfig;
use repl::Repl;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env().with_args(std::env::args().skip(1));
    if config.players.is_empty() {
        bail!("no players given: pass names as arguments or set AVALON_PLAYERS");
    }

    let log_file = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;
    println!("Logging to {}", log_file.display());

    let mut builder = Runtime::builder()
        .config(config.runtime.clone())
        .players(config.players.iter());
    if let Some(roles) = &config.roles {
        builder = builder.roles(roles.iter().cloned());
    }
    let runtime = builder.build().await.context("Failed to start the game")?;

    tracing::info!(players = ?config.players, "Game ready");

    Repl::new(runtime.handle()).run().await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
