//! The per-puzzle game session.
//!
//! ```text
//!            try_raw_input / reveal_hint
//!              ┌──────┐
//!              ▼      │
//!          ┌─────────┐  submit_validation(ok)  ┌─────┐
//! new ───► │ Playing │ ──────────────────────► │ Won │
//!          └─────────┘                         └─────┘
//!              ▲             reset               │
//!              └─────────────────────────────────┘
//! ```
//!
//! Every transition installs a new [`GameSessionState`]; earlier snapshots
//! obtained from [`GameSession::snapshot`] are never touched.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{elapsed_seconds, Clock, ScoreInput, ScoringConfig, SystemClock};
use crate::error::AttemptError;
use crate::puzzles::{Puzzle, Reveal};

use super::state::{Attempt, GameSessionState, GameStatus};

/// A player's session on one puzzle.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rule_game::puzzles::Puzzle;
/// use rule_game::rules::RuleRegistry;
/// use rule_game::session::GameSession;
///
/// let registry = RuleRegistry::standard();
/// let puzzle = Puzzle::from_rule("even-001", "Even or odd", &registry, "isEven").unwrap();
/// let mut session = GameSession::new(Arc::new(puzzle));
///
/// let attempt = session.try_raw_input("4").unwrap();
/// assert!(attempt.result);
/// assert!(session.try_raw_input("abc").is_err());
/// assert_eq!(session.state().attempts.len(), 1);
///
/// // isEven's canned cases are 1..=6
/// assert!(session.submit_validation(&[false, true, false, true, false, true]));
/// assert!(session.reveal().is_some());
/// ```
#[derive(Debug)]
pub struct GameSession<C = SystemClock> {
    puzzle: Arc<Puzzle>,
    state: GameSessionState,
    clock: C,
    scoring: ScoringConfig,
}

impl GameSession<SystemClock> {
    /// Start a session on the system clock.
    #[must_use]
    pub fn new(puzzle: Arc<Puzzle>) -> Self {
        Self::with_clock(puzzle, SystemClock)
    }
}

impl<C: Clock> GameSession<C> {
    /// Start a session reading time from `clock`.
    #[must_use]
    pub fn with_clock(puzzle: Arc<Puzzle>, clock: C) -> Self {
        let state = GameSessionState::new(puzzle.id().clone(), clock.now());
        Self {
            puzzle,
            state,
            clock,
            scoring: ScoringConfig::default(),
        }
    }

    /// Use custom scoring penalties.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn puzzle(&self) -> &Arc<Puzzle> {
        &self.puzzle
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameSessionState {
        &self.state
    }

    /// An owned copy of the current snapshot. O(1).
    #[must_use]
    pub fn snapshot(&self) -> GameSessionState {
        self.state.clone()
    }

    /// Try an input.
    ///
    /// Rejected input returns [`AttemptError::InputInvalid`] and records
    /// nothing. Accepted input is recorded as the newest attempt. Allowed in
    /// any status, and never wins the puzzle by itself.
    pub fn try_raw_input(&mut self, raw: &str) -> Result<Attempt, AttemptError> {
        let evaluation = match self.puzzle.check(raw) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                debug!(puzzle_id = %self.state.puzzle_id, raw, "input rejected");
                return Err(err);
            }
        };

        let attempt = Attempt {
            input: evaluation.input,
            result: evaluation.result,
            timestamp: self.clock.now(),
        };

        let mut next = self.state.clone();
        next.attempts.push_front(attempt.clone());
        self.state = next;

        debug!(
            puzzle_id = %self.state.puzzle_id,
            input = %attempt.input,
            result = attempt.result,
            attempts = self.state.attempts.len(),
            "attempt recorded"
        );
        Ok(attempt)
    }

    /// Reveal the next hint, or `None` once all have been shown.
    pub fn reveal_hint(&mut self) -> Option<String> {
        let hint = self.puzzle.hints().get(self.state.hint_level)?.clone();

        self.state = GameSessionState {
            hint_level: self.state.hint_level + 1,
            ..self.state.clone()
        };
        Some(hint)
    }

    /// Hints revealed so far, in authored order.
    pub fn visible_hints(&self) -> impl Iterator<Item = &str> + '_ {
        self.puzzle
            .hints()
            .iter()
            .take(self.state.hint_level)
            .map(String::as_str)
    }

    /// Submit the player's classification of the validation cases.
    ///
    /// On a full match the session is won and scored. Any mismatch, including
    /// a wrong number of answers, returns `false` and changes nothing.
    pub fn submit_validation(&mut self, answers: &[bool]) -> bool {
        if !self.puzzle.validate_answers(answers) {
            debug!(puzzle_id = %self.state.puzzle_id, "validation mismatch");
            return false;
        }

        let now = self.clock.now();
        let input = ScoreInput {
            attempts: u32::try_from(self.state.attempts.len()).unwrap_or(u32::MAX),
            hints_used: u32::try_from(self.state.hint_level).unwrap_or(u32::MAX),
            time_seconds: elapsed_seconds(self.state.started_at, now),
        };
        let score = self.scoring.score(input);

        self.state = GameSessionState {
            status: GameStatus::Won,
            won_at: Some(now),
            score: Some(score),
            ..self.state.clone()
        };

        info!(
            puzzle_id = %self.state.puzzle_id,
            score,
            attempts = input.attempts,
            hints = input.hints_used,
            seconds = input.time_seconds,
            "puzzle won"
        );
        true
    }

    /// The reveal, only once the puzzle is won.
    #[must_use]
    pub fn reveal(&self) -> Option<&Reveal> {
        self.state.is_won().then(|| self.puzzle.reveal())
    }

    /// Discard attempts, hints and any win, and restart the timer.
    pub fn reset(&mut self) {
        self.state = GameSessionState::new(self.puzzle.id().clone(), self.clock.now());
        info!(puzzle_id = %self.state.puzzle_id, "session reset");
    }
}
