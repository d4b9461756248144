//! # rule-game
//!
//! Core of a guess-the-rule puzzle game: the player types inputs, sees a
//! pass/fail verdict for each, and wins by classifying a set of validation
//! cases correctly.
//!
//! ## Design Principles
//!
//! 1. **Content Errors Fail Early**: A puzzle referencing an unknown rule is
//!    refused when it is built, never discovered during play.
//!
//! 2. **Invalid Input Is Not an Attempt**: Text a puzzle cannot read is
//!    rejected with a reason and leaves the session untouched.
//!
//! 3. **Snapshots Are Values**: Every session transition installs a new
//!    state; previously handed-out snapshots never change.
//!
//! ## Modules
//!
//! - `core`: Clock abstraction, scoring configuration
//! - `error`: Error enums per failure domain
//! - `rules`: Rules, parsers and the rule registry
//! - `logic`: Boolean expressions over registry rules
//! - `puzzles`: Puzzle definitions and JSON content loading
//! - `session`: The per-puzzle game state machine
//! - `progress`: Solved puzzles, best scores, island unlocking, persistence

pub mod core;
pub mod error;
pub mod rules;
pub mod logic;
pub mod puzzles;
pub mod session;
pub mod progress;

// Re-export commonly used types
pub use crate::core::{Clock, ManualClock, ScoreInput, ScoringConfig, SystemClock, PROGRESS_STORAGE_KEY};

pub use crate::error::{AttemptError, LoadError, ProgressError, RuleError, StorageError};

pub use crate::rules::{ParsedValue, Rule, RuleId, RuleRegistry, ValidationCase};

pub use crate::logic::{CombinedRuleDef, Combinator, LogicEvaluator, LogicExpr, RuleTest};

pub use crate::puzzles::{
    load_islands_json, starter_islands, Difficulty, EvaluationStrategy, IslandContent, Puzzle,
    PuzzleId, Reveal,
};

pub use crate::session::{Attempt, GameSession, GameSessionState, GameStatus};

pub use crate::progress::{
    FileStore, Island, IslandCatalog, IslandId, KeyValueStore, MemoryStore, ProgressStore,
    ProgressTracker, SolvedEntry,
};
