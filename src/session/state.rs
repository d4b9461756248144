//! Session state snapshots.
//!
//! `GameSessionState` is replaced wholesale on every transition. Attempts
//! live in an `im::Vector`, so cloning a snapshot is O(1) and a snapshot
//! taken before a transition never observes it.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::puzzles::PuzzleId;
use crate::rules::ParsedValue;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
}

/// One recorded try.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub input: ParsedValue,
    pub result: bool,
    pub timestamp: DateTime<Utc>,
}

/// Read model for one puzzle session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionState {
    pub puzzle_id: PuzzleId,

    pub status: GameStatus,

    /// Most recent first.
    pub attempts: Vector<Attempt>,

    /// Number of hints revealed so far.
    pub hint_level: usize,

    pub started_at: DateTime<Utc>,

    pub won_at: Option<DateTime<Utc>>,

    pub score: Option<u32>,
}

impl GameSessionState {
    /// Fresh state for a puzzle, started at `now`.
    #[must_use]
    pub fn new(puzzle_id: PuzzleId, now: DateTime<Utc>) -> Self {
        Self {
            puzzle_id,
            status: GameStatus::Playing,
            attempts: Vector::new(),
            hint_level: 0,
            started_at: now,
            won_at: None,
            score: None,
        }
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// The most recent attempt, if any.
    #[must_use]
    pub fn last_attempt(&self) -> Option<&Attempt> {
        self.attempts.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let state = GameSessionState::new(PuzzleId::new("p"), now);

        assert_eq!(state.status, GameStatus::Playing);
        assert!(state.attempts.is_empty());
        assert_eq!(state.hint_level, 0);
        assert_eq!(state.started_at, now);
        assert!(state.won_at.is_none());
        assert!(state.score.is_none());
        assert!(!state.is_won());
        assert!(state.last_attempt().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let before = GameSessionState::new(PuzzleId::new("p"), now);

        let mut after = before.clone();
        after.attempts.push_front(Attempt {
            input: ParsedValue::from(4),
            result: true,
            timestamp: now,
        });

        assert!(before.attempts.is_empty());
        assert_eq!(after.attempts.len(), 1);
    }

    #[test]
    fn test_state_serialization() {
        let state = GameSessionState::new(PuzzleId::new("p"), DateTime::<Utc>::UNIX_EPOCH);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["puzzleId"], "p");
        assert_eq!(json["status"], "playing");
        assert_eq!(json["hintLevel"], 0);

        let back: GameSessionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
