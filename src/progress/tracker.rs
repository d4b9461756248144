//! Progress tracking across sessions.
//!
//! The tracker owns the in-memory [`ProgressStore`] and writes it back to
//! its [`KeyValueStore`] after every change. It learns about wins by
//! observing session snapshots; it never drives a session itself.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::core::PROGRESS_STORAGE_KEY;
use crate::error::{ProgressError, StorageError};
use crate::puzzles::PuzzleId;
use crate::session::{GameSessionState, GameStatus};

use super::islands::{IslandCatalog, IslandId};
use super::storage::KeyValueStore;
use super::store::ProgressStore;

/// Clamp an index into `[0, len - 1]` (0 when empty).
#[must_use]
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Persisted cross-puzzle progress.
///
/// ## Example
///
/// ```
/// use rule_game::progress::{Island, IslandCatalog, IslandId, MemoryStore, ProgressTracker};
/// use rule_game::puzzles::PuzzleId;
/// use chrono::Utc;
///
/// let catalog = IslandCatalog::new(vec![
///     Island::new("island-01", "Start", [PuzzleId::new("even-001")]),
///     Island::new("island-02", "First Steps", [PuzzleId::new("gt5-001")]),
/// ]);
/// let mut tracker = ProgressTracker::load(MemoryStore::new(), catalog);
///
/// assert!(!tracker.is_island_unlocked(&IslandId::new("island-02")));
/// tracker.record_win(&PuzzleId::new("even-001"), Utc::now(), Some(690));
/// assert!(tracker.is_island_unlocked(&IslandId::new("island-02")));
/// ```
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    key: String,
    catalog: IslandCatalog,
    progress: ProgressStore,
    last_win: Option<(PuzzleId, DateTime<Utc>)>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Load progress from the default slot.
    pub fn load(store: S, catalog: IslandCatalog) -> Self {
        Self::load_with_key(store, catalog, PROGRESS_STORAGE_KEY)
    }

    /// Load progress from a custom slot.
    ///
    /// Absent, unreadable or corrupt data yields default progress. A saved
    /// selection naming an island that is missing or locked is reset.
    pub fn load_with_key(store: S, catalog: IslandCatalog, key: impl Into<String>) -> Self {
        let key = key.into();
        let first_island = catalog.first().map(|i| i.id.clone()).unwrap_or_default();

        let raw = store.read(&key).unwrap_or_else(|err| {
            warn!(key = %key, error = %err, "failed to read progress, starting fresh");
            None
        });
        let mut progress = ProgressStore::decode_or_default(raw.as_deref(), first_island.clone());

        if !catalog.is_unlocked(&progress.selected_island_id, &progress) {
            warn!(island_id = %progress.selected_island_id, "saved island is missing or locked");
            progress.selected_island_id = first_island;
        }

        Self {
            store,
            key,
            catalog,
            progress,
            last_win: None,
        }
    }

    // === Reads ===

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    #[must_use]
    pub fn catalog(&self) -> &IslandCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn is_solved(&self, puzzle_id: &PuzzleId) -> bool {
        self.progress.is_solved(puzzle_id)
    }

    #[must_use]
    pub fn best_score(&self, puzzle_id: &PuzzleId) -> Option<u32> {
        self.progress.best_score(puzzle_id)
    }

    #[must_use]
    pub fn is_island_unlocked(&self, island_id: &IslandId) -> bool {
        self.catalog.is_unlocked(island_id, &self.progress)
    }

    #[must_use]
    pub fn is_island_complete(&self, island_id: &IslandId) -> bool {
        self.catalog.is_complete(island_id, &self.progress)
    }

    #[must_use]
    pub fn selected_island(&self) -> &IslandId {
        &self.progress.selected_island_id
    }

    /// Saved puzzle index for an island holding `len` puzzles, clamped.
    #[must_use]
    pub fn puzzle_index(&self, island_id: &IslandId, len: usize) -> usize {
        let stored = self
            .progress
            .island_index_by_island
            .get(island_id)
            .copied()
            .unwrap_or(0);
        clamp_index(stored, len)
    }

    // === Updates ===

    /// Observe a session snapshot, recording a win the first time it is seen.
    ///
    /// Returns `true` if this call recorded a new win. The solve time stored
    /// is the session's `won_at`, not the moment of observation.
    pub fn observe(&mut self, state: &GameSessionState) -> bool {
        if state.status != GameStatus::Won {
            return false;
        }
        let Some(won_at) = state.won_at else {
            return false;
        };

        let seen = self
            .last_win
            .as_ref()
            .is_some_and(|(id, at)| *id == state.puzzle_id && *at == won_at);
        if seen {
            return false;
        }

        self.last_win = Some((state.puzzle_id.clone(), won_at));
        self.record_win(&state.puzzle_id, won_at, state.score);
        true
    }

    /// Record a solve and persist.
    pub fn record_win(&mut self, puzzle_id: &PuzzleId, won_at: DateTime<Utc>, score: Option<u32>) {
        self.progress.record_win(puzzle_id.clone(), won_at, score);
        info!(
            puzzle_id = %puzzle_id,
            score = ?score,
            best = ?self.progress.best_score(puzzle_id),
            "solve recorded"
        );
        self.save();
    }

    /// Select an island. Unknown and locked islands are refused.
    pub fn select_island(&mut self, island_id: &IslandId) -> Result<(), ProgressError> {
        if self.catalog.get(island_id).is_none() {
            return Err(ProgressError::UnknownIsland {
                island_id: island_id.clone(),
            });
        }
        if !self.is_island_unlocked(island_id) {
            return Err(ProgressError::IslandLocked {
                island_id: island_id.clone(),
            });
        }

        if self.progress.selected_island_id != *island_id {
            self.progress.selected_island_id = island_id.clone();
            self.save();
        }
        Ok(())
    }

    /// Remember the viewed puzzle on an island of `len` puzzles.
    ///
    /// Returns the clamped index actually stored.
    pub fn set_puzzle_index(&mut self, island_id: &IslandId, index: usize, len: usize) -> usize {
        let index = clamp_index(index, len);
        let previous = self
            .progress
            .island_index_by_island
            .insert(island_id.clone(), index);

        if previous != Some(index) {
            self.save();
        }
        index
    }

    /// Write the whole progress record to the store.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let encoded = self.progress.encode()?;
        self.store.write(&self.key, &encoded)
    }

    fn save(&mut self) {
        if let Err(err) = self.persist() {
            warn!(key = %self.key, error = %err, "failed to persist progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{Island, MemoryStore};

    fn catalog() -> IslandCatalog {
        IslandCatalog::new(vec![
            Island::new("island-01", "Start", [PuzzleId::new("a")]),
            Island::new("island-02", "First Steps", [PuzzleId::new("b"), PuzzleId::new("c")]),
        ])
    }

    fn won_state(id: &str, secs: i64, score: Option<u32>) -> GameSessionState {
        let at = DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(secs);
        GameSessionState {
            status: GameStatus::Won,
            won_at: Some(at),
            score,
            ..GameSessionState::new(PuzzleId::new(id), DateTime::<Utc>::UNIX_EPOCH)
        }
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(4, 0), 0);
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let tracker = ProgressTracker::load(MemoryStore::new(), catalog());

        assert_eq!(tracker.selected_island(), &IslandId::new("island-01"));
        assert!(tracker.progress().solved.is_empty());
        assert!(tracker.progress().island_index_by_island.is_empty());
    }

    #[test]
    fn test_defaults_on_corrupt_store() {
        let store = MemoryStore::new().with_entry(PROGRESS_STORAGE_KEY, "not json");
        let tracker = ProgressTracker::load(store, catalog());

        assert_eq!(tracker.progress(), &ProgressStore::new(IslandId::new("island-01")));
    }

    #[test]
    fn test_unknown_saved_island_reset() {
        let store = MemoryStore::new()
            .with_entry(PROGRESS_STORAGE_KEY, r#"{ "selectedIslandId": "island-99" }"#);
        let tracker = ProgressTracker::load(store, catalog());

        assert_eq!(tracker.selected_island(), &IslandId::new("island-01"));
    }

    #[test]
    fn test_locked_saved_island_reset() {
        let store = MemoryStore::new()
            .with_entry(PROGRESS_STORAGE_KEY, r#"{ "selectedIslandId": "island-02" }"#);
        let tracker = ProgressTracker::load(store, catalog());

        assert_eq!(tracker.selected_island(), &IslandId::new("island-01"));
    }

    #[test]
    fn test_unlocked_saved_island_kept() {
        let store = MemoryStore::new().with_entry(
            PROGRESS_STORAGE_KEY,
            r#"{ "selectedIslandId": "island-02", "solved": { "a": { "wonAt": 0, "bestScore": 5 } } }"#,
        );
        let tracker = ProgressTracker::load(store, catalog());

        assert_eq!(tracker.selected_island(), &IslandId::new("island-02"));
    }

    /// A store whose every read and write fails.
    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read denied").into())
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write denied").into())
        }
    }

    #[test]
    fn test_failing_store_keeps_play_going() {
        let mut tracker = ProgressTracker::load(BrokenStore, catalog());
        assert_eq!(tracker.progress(), &ProgressStore::new(IslandId::new("island-01")));

        // Write failures are swallowed by automatic saves
        tracker.record_win(&PuzzleId::new("a"), DateTime::<Utc>::UNIX_EPOCH, Some(400));
        assert!(tracker.is_solved(&PuzzleId::new("a")));
        assert_eq!(tracker.best_score(&PuzzleId::new("a")), Some(400));
        assert!(tracker.is_island_unlocked(&IslandId::new("island-02")));
        assert!(tracker.select_island(&IslandId::new("island-02")).is_ok());

        // ...but reported by an explicit persist
        assert!(matches!(tracker.persist(), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_observe_records_once() {
        let mut tracker = ProgressTracker::load(MemoryStore::new(), catalog());

        let playing = GameSessionState::new(PuzzleId::new("a"), DateTime::<Utc>::UNIX_EPOCH);
        assert!(!tracker.observe(&playing));

        let won = won_state("a", 60, Some(900));
        assert!(tracker.observe(&won));
        assert!(!tracker.observe(&won));
        assert_eq!(tracker.best_score(&PuzzleId::new("a")), Some(900));
        assert_eq!(Some(tracker.progress().solved[&PuzzleId::new("a")].won_at), won.won_at);

        // A later win of the same puzzle is fresh
        assert!(tracker.observe(&won_state("a", 120, Some(950))));
        assert_eq!(tracker.best_score(&PuzzleId::new("a")), Some(950));
    }

    #[test]
    fn test_win_is_persisted() {
        let mut tracker = ProgressTracker::load(MemoryStore::new(), catalog());
        tracker.observe(&won_state("a", 1, Some(500)));

        let raw = tracker.store().get(PROGRESS_STORAGE_KEY).unwrap();
        let saved = ProgressStore::decode_or_default(Some(raw), IslandId::default());
        assert!(saved.is_solved(&PuzzleId::new("a")));
    }

    #[test]
    fn test_select_island() {
        let mut tracker = ProgressTracker::load(MemoryStore::new(), catalog());

        assert_eq!(
            tracker.select_island(&IslandId::new("island-02")),
            Err(ProgressError::IslandLocked { island_id: IslandId::new("island-02") })
        );
        assert_eq!(
            tracker.select_island(&IslandId::new("nowhere")),
            Err(ProgressError::UnknownIsland { island_id: IslandId::new("nowhere") })
        );

        tracker.record_win(&PuzzleId::new("a"), DateTime::<Utc>::UNIX_EPOCH, Some(1));
        assert!(tracker.select_island(&IslandId::new("island-02")).is_ok());
        assert_eq!(tracker.selected_island(), &IslandId::new("island-02"));
        assert!(tracker.is_island_complete(&IslandId::new("island-01")));
        assert!(!tracker.is_island_complete(&IslandId::new("island-02")));
    }

    #[test]
    fn test_puzzle_index_per_island() {
        let mut tracker = ProgressTracker::load(MemoryStore::new(), catalog());
        let island = IslandId::new("island-02");

        assert_eq!(tracker.puzzle_index(&island, 2), 0);
        assert_eq!(tracker.set_puzzle_index(&island, 7, 2), 1);
        assert_eq!(tracker.puzzle_index(&island, 2), 1);

        // Content shrank since the index was saved
        assert_eq!(tracker.puzzle_index(&island, 1), 0);
        assert_eq!(tracker.puzzle_index(&IslandId::new("island-01"), 1), 0);
    }

    #[test]
    fn test_custom_key() {
        let mut tracker = ProgressTracker::load_with_key(MemoryStore::new(), catalog(), "slot-2");
        tracker.record_win(&PuzzleId::new("a"), DateTime::<Utc>::UNIX_EPOCH, None);

        assert!(tracker.store().get("slot-2").is_some());
        assert!(tracker.store().get(PROGRESS_STORAGE_KEY).is_none());
    }
}
