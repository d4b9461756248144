//! Core engine types: clock and configuration.
//!
//! These are shared by the session and progress components and carry no
//! puzzle-specific knowledge.

pub mod clock;
pub mod config;

pub use clock::{elapsed_seconds, Clock, ManualClock, SystemClock};
pub use config::{ScoreInput, ScoringConfig, PROGRESS_STORAGE_KEY};
