//! Cross-puzzle progress: solved puzzles, best scores, island gating.
//!
//! ## Key Types
//!
//! - `ProgressStore`: The persisted record
//! - `IslandCatalog`: Ordered islands and the unlock rule
//! - `KeyValueStore`: Whole-value persistence (`MemoryStore`, `FileStore`)
//! - `ProgressTracker`: Observes session wins and writes progress back
//!
//! There is one writer: a single local player. Writes are last-writer-wins.

pub mod islands;
pub mod storage;
pub mod store;
pub mod tracker;

pub use islands::{Island, IslandCatalog, IslandId};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{ProgressStore, SolvedEntry};
pub use tracker::{clamp_index, ProgressTracker};
