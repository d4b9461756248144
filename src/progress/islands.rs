//! Islands: ordered puzzle groups that gate progression.
//!
//! The first island is always unlocked. Island `k` unlocks once every puzzle
//! on island `k - 1` has been solved. The same completeness check drives the
//! per-island checkmark.

use serde::{Deserialize, Serialize};

use crate::puzzles::PuzzleId;

use super::store::ProgressStore;

/// Unique identifier for an island, e.g. `island-01`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IslandId(String);

impl IslandId {
    /// Create a new island ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IslandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IslandId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An island's identity and membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    pub id: IslandId,
    pub title: String,
    pub puzzle_ids: Vec<PuzzleId>,
}

impl Island {
    /// Create an island.
    pub fn new(
        id: impl Into<IslandId>,
        title: impl Into<String>,
        puzzle_ids: impl IntoIterator<Item = PuzzleId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            puzzle_ids: puzzle_ids.into_iter().collect(),
        }
    }
}

/// The ordered list of islands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IslandCatalog {
    islands: Vec<Island>,
}

impl IslandCatalog {
    /// Create a catalog; order is progression order.
    #[must_use]
    pub fn new(islands: Vec<Island>) -> Self {
        Self { islands }
    }

    /// The first island, selected by default.
    #[must_use]
    pub fn first(&self) -> Option<&Island> {
        self.islands.first()
    }

    #[must_use]
    pub fn get(&self, id: &IslandId) -> Option<&Island> {
        self.islands.iter().find(|island| island.id == *id)
    }

    /// Zero-based position in progression order.
    #[must_use]
    pub fn position(&self, id: &IslandId) -> Option<usize> {
        self.islands.iter().position(|island| island.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Island> {
        self.islands.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Every puzzle on the island has been solved.
    ///
    /// Unknown islands are never complete.
    #[must_use]
    pub fn is_complete(&self, id: &IslandId, progress: &ProgressStore) -> bool {
        self.get(id).is_some_and(|island| {
            island.puzzle_ids.iter().all(|puzzle| progress.is_solved(puzzle))
        })
    }

    /// The island may be played.
    ///
    /// Unknown islands are never unlocked.
    #[must_use]
    pub fn is_unlocked(&self, id: &IslandId, progress: &ProgressStore) -> bool {
        match self.position(id) {
            None => false,
            Some(0) => true,
            Some(pos) => self.is_complete(&self.islands[pos - 1].id, progress),
        }
    }
}
