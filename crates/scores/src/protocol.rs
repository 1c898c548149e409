//! Protocol module - JSON message types of the score service
//!
//! ```text
//! GET  /scores -> {"scores":[{"id":1,"name":"ADA","score":120,"level":3,"lines":9,"timestamp":1700000000000}]}
//! POST /scores    {"name":"ADA","score":120,"level":3,"lines":9}
//!              -> {"success":true,"scores":[...]}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::MAX_NAME_CHARS;

/// Number of entries the service keeps
pub const LEADERBOARD_CAPACITY: usize = 50;

/// Number of entries returned to clients
pub const LEADERBOARD_DISPLAY: usize = 10;

/// Name stored when a player submits a blank one
pub const ANONYMOUS_NAME: &str = "ANON";

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub id: u64,
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Body of `POST /scores`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl ScoreSubmission {
    pub fn new(name: impl Into<String>, score: u32, level: u32, lines: u32) -> Self {
        Self {
            name: name.into(),
            score,
            level,
            lines,
        }
    }
}

/// Response of `GET /scores`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoresResponse {
    #[serde(default)]
    pub scores: Vec<HighScoreEntry>,
}

/// Response of `POST /scores`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub scores: Vec<HighScoreEntry>,
}

/// Trim a player name and cut it to the displayable length.
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_CHARS)
        .collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
