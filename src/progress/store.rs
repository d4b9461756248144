//! The persisted progress record.
//!
//! Serialized as JSON:
//!
//! ```json
//! {
//!   "selectedIslandId": "island-02",
//!   "islandIndex": { "island-01": 1 },
//!   "solved": { "even-001": { "wonAt": 1700000000000, "bestScore": 690 } }
//! }
//! ```
//!
//! Decoding never fails: a missing or unreadable record yields the default.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::puzzles::PuzzleId;

use super::islands::IslandId;

/// Record of a solved puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub won_at: DateTime<Utc>,

    pub best_score: Option<u32>,
}

/// Cross-puzzle progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStore {
    pub selected_island_id: IslandId,

    /// Last viewed puzzle index per island.
    #[serde(rename = "islandIndex", default)]
    pub island_index_by_island: BTreeMap<IslandId, usize>,

    #[serde(default)]
    pub solved: BTreeMap<PuzzleId, SolvedEntry>,
}

impl ProgressStore {
    /// Empty progress with `first_island` selected.
    #[must_use]
    pub fn new(first_island: IslandId) -> Self {
        Self {
            selected_island_id: first_island,
            island_index_by_island: BTreeMap::new(),
            solved: BTreeMap::new(),
        }
    }

    /// Decode a persisted record, falling back to defaults on absence or corruption.
    #[must_use]
    pub fn decode_or_default(raw: Option<&str>, first_island: IslandId) -> Self {
        let Some(raw) = raw else {
            return Self::new(first_island);
        };

        match serde_json::from_str(raw) {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "persisted progress is corrupt, starting fresh");
                Self::new(first_island)
            }
        }
    }

    /// Encode for persistence.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Upsert a win, keeping the best score seen.
    ///
    /// A `None` score never replaces a recorded one.
    pub fn record_win(&mut self, puzzle_id: PuzzleId, won_at: DateTime<Utc>, score: Option<u32>) {
        let previous = self.solved.get(&puzzle_id).and_then(|entry| entry.best_score);

        let best_score = match (previous, score) {
            (Some(prev), Some(new)) => Some(prev.max(new)),
            (prev, None) => prev,
            (None, new) => new,
        };

        self.solved.insert(puzzle_id, SolvedEntry { won_at, best_score });
    }

    #[must_use]
    pub fn is_solved(&self, puzzle_id: &PuzzleId) -> bool {
        self.solved.contains_key(puzzle_id)
    }

    #[must_use]
    pub fn best_score(&self, puzzle_id: &PuzzleId) -> Option<u32> {
        self.solved.get(puzzle_id).and_then(|entry| entry.best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn store() -> ProgressStore {
        ProgressStore::new(IslandId::new("island-01"))
    }

    #[test]
    fn test_best_score_merge() {
        let mut progress = store();
        let id = PuzzleId::new("p");

        progress.record_win(id.clone(), at(1), Some(500));
        assert_eq!(progress.best_score(&id), Some(500));

        progress.record_win(id.clone(), at(2), Some(300));
        assert_eq!(progress.best_score(&id), Some(500));

        progress.record_win(id.clone(), at(3), Some(800));
        assert_eq!(progress.best_score(&id), Some(800));

        progress.record_win(id.clone(), at(4), None);
        assert_eq!(progress.best_score(&id), Some(800));
        assert_eq!(progress.solved[&id].won_at, at(4));
    }

    #[test]
    fn test_null_score_first() {
        let mut progress = store();
        let id = PuzzleId::new("p");

        progress.record_win(id.clone(), at(1), None);
        assert!(progress.is_solved(&id));
        assert_eq!(progress.best_score(&id), None);

        progress.record_win(id.clone(), at(2), Some(10));
        assert_eq!(progress.best_score(&id), Some(10));
    }

    #[test]
    fn test_json_shape() {
        let mut progress = store();
        progress.island_index_by_island.insert(IslandId::new("island-01"), 1);
        progress.record_win(PuzzleId::new("even-001"), at(1_700_000_000), Some(690));

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "selectedIslandId": "island-01",
                "islandIndex": { "island-01": 1 },
                "solved": { "even-001": { "wonAt": 1_700_000_000_000_i64, "bestScore": 690 } }
            })
        );
    }

    #[test]
    fn test_decode_recovers_from_corruption() {
        let first = IslandId::new("island-01");

        assert_eq!(ProgressStore::decode_or_default(None, first.clone()), store());
        assert_eq!(ProgressStore::decode_or_default(Some("{ oops"), first.clone()), store());
        assert_eq!(ProgressStore::decode_or_default(Some("42"), first.clone()), store());
        assert_eq!(ProgressStore::decode_or_default(Some(""), first), store());
    }

    #[test]
    fn test_decode_tolerates_missing_maps() {
        let progress =
            ProgressStore::decode_or_default(Some(r#"{ "selectedIslandId": "island-02" }"#), IslandId::new("island-01"));

        assert_eq!(progress.selected_island_id, IslandId::new("island-02"));
        assert!(progress.solved.is_empty());
    }

    #[test]
    fn test_encode_decode() {
        let mut progress = store();
        progress.record_win(PuzzleId::new("a"), at(5), Some(1));

        let raw = progress.encode().unwrap();
        let back = ProgressStore::decode_or_default(Some(&raw), IslandId::new("other"));
        assert_eq!(back, progress);
    }
}
