//! Reward hook - a one-shot coupon unlock per session.

use tracing::info;

/// Fired once when the session score first reaches the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEvent {
    pub code: String,
}

/// Watches the score and emits the coupon exactly once.
#[derive(Debug, Clone)]
pub struct RewardTracker {
    threshold: u32,
    code: String,
    fired: bool,
}

impl RewardTracker {
    pub fn new(threshold: u32, code: impl Into<String>) -> Self {
        Self {
            threshold,
            code: code.into(),
            fired: false,
        }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Feed the current score; yields the event the first time it crosses the threshold.
    pub fn observe(&mut self, score: u32) -> Option<RewardEvent> {
        if self.fired || score < self.threshold {
            return None;
        }
        self.fired = true;
        info!(score, threshold = self.threshold, "reward unlocked");
        Some(RewardEvent {
            code: self.code.clone(),
        })
    }

    /// Re-arm for a new session.
    pub fn reset(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_session() {
        let mut t = RewardTracker::new(500, "KUPMAX30OFF");
        assert_eq!(t.observe(490), None);
        assert_eq!(
            t.observe(750),
            Some(RewardEvent {
                code: "KUPMAX30OFF".to_string()
            })
        );
        assert_eq!(t.observe(1200), None);
        assert!(t.fired());
    }

    #[test]
    fn fires_exactly_at_threshold() {
        let mut t = RewardTracker::new(500, "X");
        assert!(t.observe(500).is_some());
    }

    #[test]
    fn reset_rearms() {
        let mut t = RewardTracker::new(10, "C");
        assert!(t.observe(10).is_some());
        t.reset();
        assert!(!t.fired());
        assert!(t.observe(20).is_some());
    }
}
