//! Terminal client for dungeon skirmishes.
//!
//! Composition root: reads configuration from the environment, installs file
//! logging, loads content from the data directory and hands the encounters
//! to the runtime with either an interactive or an automatic player.
//!
//! ```bash
//! # Five-floor campaign with a fixed seed
//! COMBAT_SEED=42 cargo run -p combat-client
//!
//! # Automatic duel against the rival sheet
//! COMBAT_AUTO=1 cargo run -p combat-client -- duel
//! ```

mod app;
mod config;
mod logging;
mod terminal;

use anyhow::Result;

use crate::app::Mode;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let (_guard, log_path) = logging::setup_logging(config.session_id.as_deref())?;

    let mode = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Mode>()?,
        None => Mode::default(),
    };

    tracing::info!(?mode, log = %log_path.display(), "starting skirmish");
    app::run(config, mode).await?;
    tracing::info!("skirmish finished");
    Ok(())
}
