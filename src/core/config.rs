//! Configuration types.
//!
//! - `ScoringConfig`: the penalties applied when a puzzle is won
//! - `PROGRESS_STORAGE_KEY`: the default key-value slot for saved progress
//!
//! The defaults reproduce the published scoring formula:
//!
//! ```text
//! score = max(0, 1000 - attempts*50 - hints*120 - floor(seconds/10)*10)
//! ```

use serde::{Deserialize, Serialize};

/// Default key-value slot holding the serialized progress store.
pub const PROGRESS_STORAGE_KEY: &str = "rulegame.progress.v1";

/// Inputs to the score formula, captured at the moment of winning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    /// Recorded (successfully parsed) attempts.
    pub attempts: u32,
    /// Hints revealed.
    pub hints_used: u32,
    /// Whole seconds since the session started.
    pub time_seconds: u64,
}

/// Scoring penalties.
///
/// Every penalty is non-negative, so the score is non-increasing in each
/// input and never drops below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score for a perfect solve.
    pub base: u32,

    /// Deducted per recorded attempt.
    pub attempt_penalty: u32,

    /// Deducted per revealed hint.
    pub hint_penalty: u32,

    /// Length of one time bucket in seconds. Zero disables the time penalty.
    pub time_bucket_secs: u64,

    /// Deducted per completed time bucket.
    pub time_bucket_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: 1000,
            attempt_penalty: 50,
            hint_penalty: 120,
            time_bucket_secs: 10,
            time_bucket_penalty: 10,
        }
    }
}

impl ScoringConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base score.
    #[must_use]
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Set the per-attempt penalty.
    #[must_use]
    pub fn with_attempt_penalty(mut self, penalty: u32) -> Self {
        self.attempt_penalty = penalty;
        self
    }

    /// Set the per-hint penalty.
    #[must_use]
    pub fn with_hint_penalty(mut self, penalty: u32) -> Self {
        self.hint_penalty = penalty;
        self
    }

    /// Set the time bucket length and its penalty.
    #[must_use]
    pub fn with_time_penalty(mut self, bucket_secs: u64, penalty: u32) -> Self {
        self.time_bucket_secs = bucket_secs;
        self.time_bucket_penalty = penalty;
        self
    }

    /// Compute the score for a win.
    #[must_use]
    pub fn score(&self, input: ScoreInput) -> u32 {
        let buckets = if self.time_bucket_secs == 0 {
            0
        } else {
            input.time_seconds / self.time_bucket_secs
        };

        let penalty = (u64::from(input.attempts) * u64::from(self.attempt_penalty))
            .saturating_add(u64::from(input.hints_used) * u64::from(self.hint_penalty))
            .saturating_add(buckets.saturating_mul(u64::from(self.time_bucket_penalty)));

        // Fits: bounded above by `base`
        u64::from(self.base).saturating_sub(penalty) as u32
    }
}
