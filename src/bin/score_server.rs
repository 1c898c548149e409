//! Score service binary.
//!
//! Serves `GET /scores` and `POST /scores` from an in-memory leaderboard.
//!
//! Usage:
//!   PENTRIS_SCORE_HOST=0.0.0.0 PENTRIS_SCORE_PORT=7780 score-server
//!
//! `PENTRIS_LOG_LEVEL` selects the log level (default "info").

use std::str::FromStr;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use pentris::scores::{run_server, ScoreServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let level = std::env::var("PENTRIS_LOG_LEVEL")
        .ok()
        .and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let config = ScoreServerConfig::from_env();
    info!(host = %config.host, port = config.port, "starting score service");

    tokio::select! {
        res = run_server(config, None) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            Ok(())
        }
    }
}
