//! Puzzles: definitions, evaluation strategy, and content loading.
//!
//! ## Key Types
//!
//! - `PuzzleId`: Unique puzzle identifier
//! - `Puzzle`: Immutable playable unit (strategy + hints + cases + reveal)
//! - `EvaluationStrategy`: Single rule or logic expression
//! - `PuzzleDef` / `IslandDef`: Authored JSON content
//! - `IslandContent`: A loaded island with its puzzles
//!
//! Unknown rule references are caught when a puzzle is built, never during play.

pub mod definition;
pub mod loader;

pub use definition::{
    Difficulty, Evaluation, EvaluationStrategy, Puzzle, PuzzleId, Reveal, RevealExample,
};
pub use loader::{load_islands, load_islands_json, starter_islands, IslandContent, IslandDef, PuzzleDef};
