//! Scoring module - line clear points, level progression and gravity speed
//!
//! - A clear of `n` rows at level `L` is worth `n * 10 * L`.
//! - Level is `score / 50 + 1`.
//! - Gravity interval is `max(200, 500 - (level - 1) * 20)` milliseconds.
//!
//! Which score the level is derived from after a clear is a rule choice, see
//! [`LevelRule`].

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINE_POINTS, POINTS_PER_LEVEL};

/// Score a level is recomputed from after a line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelRule {
    /// Level follows the score including the points just awarded.
    #[default]
    AfterIncrement,
    /// Level follows the score as it was before the clear, so leveling lags
    /// one clear behind (legacy web build behavior).
    BeforeIncrement,
}

impl LevelRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "after" | "post" | "after_increment" => Some(LevelRule::AfterIncrement),
            "before" | "pre" | "before_increment" | "legacy" => Some(LevelRule::BeforeIncrement),
            _ => None,
        }
    }
}

/// Outcome of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this clear
    pub points: u32,
    /// Total score afterwards
    pub score: u32,
    /// Level afterwards
    pub level: u32,
}

impl ScoreResult {
    pub fn level_changed(&self, previous_level: u32) -> bool {
        self.level != previous_level
    }
}

/// Points for clearing `lines` rows at once on `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(LINE_POINTS)
        .saturating_mul(level.max(1))
}

/// Level reached with a given cumulative score (1-based)
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Gravity interval for a level in milliseconds
pub fn gravity_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(steps).max(DROP_INTERVAL_MIN_MS)
}

/// Apply a clear of `lines` rows to the running score.
pub fn calculate_score(score: u32, level: u32, lines: u32, rule: LevelRule) -> ScoreResult {
    if lines == 0 {
        return ScoreResult {
            points: 0,
            score,
            level,
        };
    }

    let points = calculate_line_score(lines, level);
    let new_score = score.saturating_add(points);
    let new_level = match rule {
        LevelRule::AfterIncrement => level_for_score(new_score),
        LevelRule::BeforeIncrement => level_for_score(score),
    };

    ScoreResult {
        points,
        score: new_score,
        level: new_level,
    }
}
