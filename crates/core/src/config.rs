//! Game configuration from environment variables.
//!
//! - `PENTRIS_COUPON_CODE`: coupon handed out by the reward hook (default "KUPMAX30OFF")
//! - `PENTRIS_REWARD_THRESHOLD`: score that unlocks the coupon (default 500)
//! - `PENTRIS_LEVEL_RULE`: "after" (default) or "before", see [`LevelRule`]
//! - `PENTRIS_SEED`: fixed RNG seed, otherwise the host picks one

use crate::scoring::LevelRule;
use crate::types::{DEFAULT_COUPON_CODE, DEFAULT_REWARD_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub coupon_code: String,
    pub reward_threshold: u32,
    pub level_rule: LevelRule,
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            coupon_code: DEFAULT_COUPON_CODE.to_string(),
            reward_threshold: DEFAULT_REWARD_THRESHOLD,
            level_rule: LevelRule::AfterIncrement,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary variable lookup; unparsable values fall back to defaults.
    pub fn from_env_with<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let coupon_code = get_env("PENTRIS_COUPON_CODE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.coupon_code);

        let reward_threshold = get_env("PENTRIS_REWARD_THRESHOLD")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.reward_threshold);

        let level_rule = get_env("PENTRIS_LEVEL_RULE")
            .and_then(|s| LevelRule::from_str(&s))
            .unwrap_or(defaults.level_rule);

        let seed = get_env("PENTRIS_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            coupon_code,
            reward_threshold,
            level_rule,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = GameConfig::from_env_with(|_| None);
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.coupon_code, "KUPMAX30OFF");
        assert_eq!(cfg.reward_threshold, 500);
    }

    #[test]
    fn env_overrides() {
        let cfg = GameConfig::from_env_with(|k| match k {
            "PENTRIS_COUPON_CODE" => Some("SPRING10".to_string()),
            "PENTRIS_REWARD_THRESHOLD" => Some("250".to_string()),
            "PENTRIS_LEVEL_RULE" => Some("before".to_string()),
            "PENTRIS_SEED" => Some("42".to_string()),
            _ => None,
        });
        assert_eq!(cfg.coupon_code, "SPRING10");
        assert_eq!(cfg.reward_threshold, 250);
        assert_eq!(cfg.level_rule, LevelRule::BeforeIncrement);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn blank_or_invalid_values_fall_back() {
        let cfg = GameConfig::from_env_with(|k| match k {
            "PENTRIS_COUPON_CODE" => Some("   ".to_string()),
            "PENTRIS_REWARD_THRESHOLD" => Some("lots".to_string()),
            "PENTRIS_LEVEL_RULE" => Some("?".to_string()),
            _ => None,
        });
        assert_eq!(cfg, GameConfig::default());
    }
}
