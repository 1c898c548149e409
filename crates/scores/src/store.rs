//! In-memory leaderboard owned by the score service.
//!
//! Entries are kept sorted by score (descending). Ties keep submission order,
//! so an older entry ranks above a newer one with the same score. Every insert
//! truncates to the capacity explicitly.

use std::sync::{Arc, Mutex};

use crate::protocol::{sanitize_name, HighScoreEntry, ScoreSubmission, LEADERBOARD_CAPACITY};

pub type SharedStore = Arc<Mutex<ScoreStore>>;

#[derive(Debug, Clone)]
pub struct ScoreStore {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
    next_id: u64,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
        }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a submission and return the stored entry.
    ///
    /// The entry may be truncated away immediately if it does not make the cut.
    pub fn insert(&mut self, submission: &ScoreSubmission, timestamp: u64) -> HighScoreEntry {
        let entry = HighScoreEntry {
            id: self.next_id,
            name: sanitize_name(&submission.name),
            score: submission.score,
            level: submission.level,
            lines: submission.lines,
            timestamp,
        };
        self.next_id += 1;

        self.entries.push(entry.clone());
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
        entry
    }

    /// Best `n` entries
    pub fn top(&self, n: usize) -> Vec<HighScoreEntry> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// 1-based rank of an entry id, if it is still on the board
    pub fn rank_of(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id).map(|i| i + 1)
    }
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
