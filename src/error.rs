//! Error types.
//!
//! Each failure domain gets its own enum so callers can match on exactly
//! the failures an operation can produce:
//!
//! - [`RuleError`]: registry lookups
//! - [`LoadError`]: construction-time content errors (fatal for a puzzle load)
//! - [`AttemptError`]: player input rejected by a session
//! - [`StorageError`]: key-value store reads and writes
//! - [`ProgressError`]: island navigation

use thiserror::Error;

use crate::puzzles::PuzzleId;
use crate::progress::IslandId;
use crate::rules::RuleId;

/// Registry lookup failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// No rule is registered under this id.
    #[error("rule not found: {rule_id}")]
    NotFound { rule_id: RuleId },
}

/// Content error raised while building a puzzle or island.
///
/// These are authoring bugs. A puzzle that fails to load is never playable.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The puzzle references a rule the registry does not know.
    #[error("puzzle {puzzle_id} references unknown rule {rule_id}")]
    UnknownRule { puzzle_id: PuzzleId, rule_id: RuleId },

    /// Neither a rule, a logic expression, nor a combined rule was given.
    #[error("puzzle {puzzle_id} has no evaluation strategy")]
    MissingStrategy { puzzle_id: PuzzleId },

    /// More than one evaluation strategy was given.
    #[error("puzzle {puzzle_id} declares more than one evaluation strategy")]
    AmbiguousStrategy { puzzle_id: PuzzleId },

    /// A logic puzzle must author its own validation cases.
    #[error("puzzle {puzzle_id} has no validation cases")]
    MissingValidationCases { puzzle_id: PuzzleId },

    /// Two puzzles in the same content set share an id.
    #[error("duplicate puzzle id {puzzle_id}")]
    DuplicatePuzzle { puzzle_id: PuzzleId },

    /// Content could not be decoded.
    #[error("invalid puzzle content: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejection returned by [`GameSession::try_raw_input`](crate::session::GameSession::try_raw_input).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// The raw input could not be parsed for this puzzle. No attempt was recorded.
    #[error("invalid input: {raw:?}")]
    InputInvalid { raw: String },
}

impl AttemptError {
    /// Stable reason code for the rejection.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InputInvalid { .. } => "INPUT_INVALID",
        }
    }
}

/// Key-value store failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Island navigation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("unknown island {island_id}")]
    UnknownIsland { island_id: IslandId },

    #[error("island {island_id} is locked")]
    IslandLocked { island_id: IslandId },
}
