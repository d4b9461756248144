//! Content loading: JSON puzzle definitions into playable puzzles.
//!
//! Content is authored per island. Each puzzle names exactly one of:
//!
//! - `rule`: a single registry rule
//! - `logic`: a full [`LogicExpr`] tree
//! - `combined`: a flat AND/OR over rule names
//!
//! Loading is all-or-nothing: one bad puzzle aborts the whole set.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoadError;
use crate::logic::{CombinedRuleDef, LogicExpr};
use crate::progress::{Island, IslandId};
use crate::rules::{RuleId, RuleRegistry, ValidationCase};

use super::definition::{Difficulty, Puzzle, PuzzleId, Reveal};

const STARTER_CONTENT: &str = include_str!("../../content/starter.json");

/// A puzzle as authored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDef {
    pub id: PuzzleId,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub rule: Option<RuleId>,

    #[serde(default)]
    pub logic: Option<LogicExpr>,

    #[serde(default)]
    pub combined: Option<CombinedRuleDef>,

    #[serde(default)]
    pub hints: Vec<String>,

    /// Overrides the rule's canned cases. Required for `logic` and `combined`.
    #[serde(default)]
    pub validation_cases: Vec<ValidationCase>,

    pub reveal: Reveal,
}

impl PuzzleDef {
    /// Build the playable puzzle, failing on any unknown rule.
    pub fn load(self, registry: &Arc<RuleRegistry>) -> Result<Puzzle, LoadError> {
        let puzzle = match (self.rule, self.logic, self.combined) {
            (Some(rule_id), None, None) => {
                Puzzle::from_rule(self.id, self.title, registry, rule_id.as_str())?
                    .with_validation_cases(self.validation_cases)
            }
            (None, Some(expr), None) => Puzzle::from_logic(
                self.id,
                self.title,
                Arc::clone(registry),
                expr,
                self.validation_cases,
            )?,
            (None, None, Some(combined)) => Puzzle::from_logic(
                self.id,
                self.title,
                Arc::clone(registry),
                combined.compile(),
                self.validation_cases,
            )?,
            (None, None, None) => return Err(LoadError::MissingStrategy { puzzle_id: self.id }),
            _ => return Err(LoadError::AmbiguousStrategy { puzzle_id: self.id }),
        };

        let puzzle = puzzle
            .with_difficulty(self.difficulty)
            .with_hints(self.hints)
            .with_reveal(self.reveal);

        Ok(match self.description {
            Some(description) => puzzle.with_description(description),
            None => puzzle,
        })
    }
}

/// An island as authored: an ordered group of puzzles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IslandDef {
    pub id: IslandId,
    pub title: String,
    pub puzzles: Vec<PuzzleDef>,
}

/// A loaded island and its puzzles, in authored order.
#[derive(Clone, Debug)]
pub struct IslandContent {
    pub id: IslandId,
    pub title: String,
    pub puzzles: Vec<Arc<Puzzle>>,
}

impl IslandContent {
    /// The island's id, title and puzzle ids, for progress tracking.
    #[must_use]
    pub fn island(&self) -> Island {
        Island::new(
            self.id.clone(),
            self.title.clone(),
            self.puzzles.iter().map(|p| p.id().clone()),
        )
    }

    /// Find a puzzle by id.
    #[must_use]
    pub fn puzzle(&self, id: &PuzzleId) -> Option<&Arc<Puzzle>> {
        self.puzzles.iter().find(|p| p.id() == id)
    }
}

/// Load an ordered set of islands.
///
/// Puzzle ids must be unique across the whole set.
pub fn load_islands(
    defs: Vec<IslandDef>,
    registry: &Arc<RuleRegistry>,
) -> Result<Vec<IslandContent>, LoadError> {
    let mut seen = FxHashSet::default();
    let mut islands = Vec::with_capacity(defs.len());

    for def in defs {
        let mut puzzles = Vec::with_capacity(def.puzzles.len());
        for puzzle_def in def.puzzles {
            if !seen.insert(puzzle_def.id.clone()) {
                return Err(LoadError::DuplicatePuzzle { puzzle_id: puzzle_def.id });
            }
            puzzles.push(Arc::new(puzzle_def.load(registry)?));
        }

        debug!(island_id = %def.id, puzzles = puzzles.len(), "loaded island");
        islands.push(IslandContent {
            id: def.id,
            title: def.title,
            puzzles,
        });
    }

    Ok(islands)
}

/// Parse and load islands from JSON (an array of island objects).
pub fn load_islands_json(
    json: &str,
    registry: &Arc<RuleRegistry>,
) -> Result<Vec<IslandContent>, LoadError> {
    let defs: Vec<IslandDef> = serde_json::from_str(json)?;
    load_islands(defs, registry)
}

/// The bundled starter islands.
pub fn starter_islands(registry: &Arc<RuleRegistry>) -> Result<Vec<IslandContent>, LoadError> {
    load_islands_json(STARTER_CONTENT, registry)
}
