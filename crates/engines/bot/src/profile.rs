//! Strength levels.
//!
//! A level (1 = beginner .. 5 = strongest) fixes how deep and how long the
//! internal search runs, and how an external engine is tuned.

use std::time::Duration;

use crate::driver::SearchLimits;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Settings sent to an external UCI engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTuning {
    pub threads: u32,
    pub hash_mb: u32,
    pub skill_level: u8,
    pub move_overhead_ms: u32,
    /// `Some` turns on `UCI_LimitStrength` with this Elo.
    pub elo_cap: Option<u32>,
    pub depth: u32,
    pub move_time: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthProfile {
    pub level: u8,
    pub max_depth: i32,
    pub budget: Duration,
    pub use_book: bool,
    pub random_odds: f64,
    pub external: ExternalTuning,
}

impl StrengthProfile {
    /// Profile for `strength`, clamped into `MIN_LEVEL..=MAX_LEVEL`.
    pub fn for_level(strength: i32) -> Self {
        let level = strength.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8;
        let ms = Duration::from_millis;

        // Levels 1 and 2 scale with the level; 3 and up share the strong search.
        let (max_depth, budget, use_book, random_odds) = match level {
            1 => (2, ms(500), false, 0.3),
            2 => (4, ms(1_000), false, 0.0),
            _ => (10, ms(5_000), true, 0.0),
        };

        let external = match level {
            1 => ExternalTuning {
                threads: 1,
                hash_mb: 16,
                skill_level: 5,
                move_overhead_ms: 10,
                elo_cap: Some(1200),
                depth: 5,
                move_time: ms(500),
            },
            2 => ExternalTuning {
                threads: 1,
                hash_mb: 64,
                skill_level: 10,
                move_overhead_ms: 10,
                elo_cap: Some(1800),
                depth: 8,
                move_time: ms(1_000),
            },
            3 => ExternalTuning {
                threads: 4,
                hash_mb: 512,
                skill_level: 20,
                move_overhead_ms: 10,
                elo_cap: None,
                depth: 18,
                move_time: ms(3_000),
            },
            4 => ExternalTuning {
                threads: 4,
                hash_mb: 256,
                skill_level: 20,
                move_overhead_ms: 80,
                elo_cap: None,
                depth: 15,
                move_time: ms(3_000),
            },
            _ => ExternalTuning {
                threads: 4,
                hash_mb: 512,
                skill_level: 20,
                move_overhead_ms: 100,
                elo_cap: None,
                depth: 18,
                move_time: ms(5_000),
            },
        };

        Self {
            level,
            max_depth,
            budget,
            use_book,
            random_odds,
            external,
        }
    }

    /// Cap both the internal budget and the external move time.
    pub fn capped(mut self, max_move_time: Option<Duration>) -> Self {
        if let Some(cap) = max_move_time {
            self.budget = self.budget.min(cap);
            self.external.move_time = self.external.move_time.min(cap);
        }
        self
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            budget: self.budget,
            use_book: self.use_book,
            random_odds: self.random_odds,
        }
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod profile_tests;
