//! Scores module - leaderboard service and the game's gateway to it
//!
//! The game keeps high scores outside the process. This crate holds both sides
//! of that boundary:
//!
//! - [`protocol`]: JSON payloads shared by client and service
//! - [`store`]: the in-memory leaderboard (sorted, capped at 50 entries)
//! - [`server`]: axum routes `GET /scores` and `POST /scores`
//! - [`client`]: [`ScoreGateway`], a hyper client that degrades to an empty list
//! - [`runtime`]: [`ScoreRuntime`], a background tokio runtime the sync game
//!   loop talks to over channels
//!
//! # Environment Variables
//!
//! - `PENTRIS_SCORE_URL`: gateway endpoint (default "http://127.0.0.1:7780/scores")
//! - `PENTRIS_SCORE_TIMEOUT_MS`: gateway request timeout (default 3000)
//! - `PENTRIS_SCORES_DISABLED`: "1" or "true" disables the gateway entirely
//! - `PENTRIS_SCORE_HOST` / `PENTRIS_SCORE_PORT`: service bind address (default 127.0.0.1:7780)
//!
//! # Testing
//!
//! ```bash
//! curl -s localhost:7780/scores
//! curl -s -XPOST localhost:7780/scores -H 'content-type: application/json' \
//!      -d '{"name":"ADA","score":120,"level":3,"lines":9}'
//! ```

pub mod client;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod store;

pub use pentris_types as types;

pub use client::{GatewayConfig, ScoreGateway};
pub use protocol::{HighScoreEntry, ScoreSubmission, ScoresResponse, SubmitResponse};
pub use runtime::{ScoreReply, ScoreRequest, ScoreRuntime};
pub use server::{router, run_server, ScoreServerConfig};
pub use store::{ScoreStore, SharedStore};
