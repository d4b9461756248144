//! Puzzle definitions - one playable unit.
//!
//! A `Puzzle` binds exactly one evaluation strategy (a single rule, or a
//! logic expression over the registry) to its hints, validation cases and
//! reveal text. Puzzles are immutable once built, and building one fails if
//! any referenced rule is missing from the registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AttemptError, LoadError};
use crate::logic::{LogicEvaluator, LogicExpr};
use crate::rules::{ParsedValue, Rule, RuleRegistry, ValidationCase};

/// Unique identifier for a puzzle, e.g. `even-001`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Create a new puzzle ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A worked example shown alongside the reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealExample {
    pub input: ParsedValue,
    pub result: bool,
}

/// The explanation shown once the puzzle is won.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reveal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<RevealExample>,
}

impl Reveal {
    /// Create a reveal with only a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
            examples: Vec::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a worked example.
    #[must_use]
    pub fn with_example(mut self, input: impl Into<ParsedValue>, result: bool) -> Self {
        self.examples.push(RevealExample {
            input: input.into(),
            result,
        });
        self
    }
}

/// How a puzzle judges input.
#[derive(Clone, Debug)]
pub enum EvaluationStrategy {
    /// Parse with the rule, then evaluate the parsed value.
    Rule(Rule),

    /// Evaluate an expression; each leaf parses the raw input itself.
    Logic {
        expr: LogicExpr,
        registry: Arc<RuleRegistry>,
    },
}

/// An accepted input and its verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub input: ParsedValue,
    pub result: bool,
}

/// An immutable, playable puzzle.
///
/// ## Example
///
/// ```
/// use rule_game::puzzles::{Puzzle, Reveal};
/// use rule_game::rules::RuleRegistry;
///
/// let registry = RuleRegistry::standard();
/// let puzzle = Puzzle::from_rule("even-001", "Even or odd", &registry, "isEven")
///     .unwrap()
///     .with_hints(["Try small numbers.", "Think about dividing by 2."])
///     .with_reveal(Reveal::new("Even numbers pass."));
///
/// assert!(puzzle.is_valid_input("4"));
/// assert!(!puzzle.is_valid_input("abc"));
/// assert!(puzzle.check("abc").is_err());
/// assert_eq!(puzzle.validation_cases().len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    id: PuzzleId,
    title: String,
    description: Option<String>,
    difficulty: Difficulty,
    hints: Vec<String>,
    validation_cases: Vec<ValidationCase>,
    reveal: Reveal,
    strategy: EvaluationStrategy,
}

impl Puzzle {
    /// Build a single-rule puzzle.
    ///
    /// Validation cases default to the rule's canned cases.
    pub fn from_rule(
        id: impl Into<PuzzleId>,
        title: impl Into<String>,
        registry: &RuleRegistry,
        rule_id: &str,
    ) -> Result<Self, LoadError> {
        let id = id.into();
        let rule = registry
            .lookup(rule_id)
            .map_err(|_| LoadError::UnknownRule {
                puzzle_id: id.clone(),
                rule_id: rule_id.into(),
            })?
            .clone();

        let validation_cases = rule.validation_cases().to_vec();
        if validation_cases.is_empty() {
            return Err(LoadError::MissingValidationCases { puzzle_id: id });
        }

        Ok(Self {
            id,
            title: title.into(),
            description: None,
            difficulty: Difficulty::default(),
            hints: Vec::new(),
            validation_cases,
            reveal: Reveal::default(),
            strategy: EvaluationStrategy::Rule(rule),
        })
    }

    /// Build a logic puzzle.
    ///
    /// Every rule the expression references must be registered, and the
    /// validation cases must be authored explicitly.
    pub fn from_logic(
        id: impl Into<PuzzleId>,
        title: impl Into<String>,
        registry: Arc<RuleRegistry>,
        expr: LogicExpr,
        validation_cases: Vec<ValidationCase>,
    ) -> Result<Self, LoadError> {
        let id = id.into();

        if let Some(missing) = expr.rule_ids().into_iter().find(|r| !registry.contains(r.as_str())) {
            return Err(LoadError::UnknownRule {
                puzzle_id: id,
                rule_id: missing.clone(),
            });
        }
        if validation_cases.is_empty() {
            return Err(LoadError::MissingValidationCases { puzzle_id: id });
        }

        debug!(puzzle_id = %id, expr = %expr, "built logic puzzle");

        Ok(Self {
            id,
            title: title.into(),
            description: None,
            difficulty: Difficulty::default(),
            hints: Vec::new(),
            validation_cases,
            reveal: Reveal::default(),
            strategy: EvaluationStrategy::Logic { expr, registry },
        })
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the difficulty tier.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the hints, in reveal order.
    #[must_use]
    pub fn with_hints<S: Into<String>>(mut self, hints: impl IntoIterator<Item = S>) -> Self {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the validation cases.
    ///
    /// An empty list leaves the existing cases in place.
    #[must_use]
    pub fn with_validation_cases(mut self, cases: Vec<ValidationCase>) -> Self {
        if !cases.is_empty() {
            self.validation_cases = cases;
        }
        self
    }

    /// Set the reveal shown after winning.
    #[must_use]
    pub fn with_reveal(mut self, reveal: Reveal) -> Self {
        self.reveal = reveal;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &PuzzleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    #[must_use]
    pub fn validation_cases(&self) -> &[ValidationCase] {
        &self.validation_cases
    }

    #[must_use]
    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    #[must_use]
    pub fn strategy(&self) -> &EvaluationStrategy {
        &self.strategy
    }

    // === Evaluation ===

    /// Judge raw input, distinguishing rejected input from a `false` verdict.
    ///
    /// Single-rule puzzles reject text their rule cannot parse. Logic
    /// puzzles reject only blank text, recording anything else verbatim.
    pub fn check(&self, raw: &str) -> Result<Evaluation, AttemptError> {
        let invalid = || AttemptError::InputInvalid { raw: raw.to_string() };

        match &self.strategy {
            EvaluationStrategy::Rule(rule) => {
                let input = rule.parse(raw).ok_or_else(invalid)?;
                let result = rule.evaluate(&input);
                Ok(Evaluation { input, result })
            }
            EvaluationStrategy::Logic { expr, registry } => {
                if raw.trim().is_empty() {
                    return Err(invalid());
                }
                let result = LogicEvaluator::new(registry).evaluate(expr, raw);
                Ok(Evaluation {
                    input: ParsedValue::Text(raw.to_string()),
                    result,
                })
            }
        }
    }

    /// Whether raw input satisfies the hidden rule. Rejected input is `false`.
    #[must_use]
    pub fn is_valid_input(&self, raw: &str) -> bool {
        match &self.strategy {
            EvaluationStrategy::Logic { expr, registry } => {
                LogicEvaluator::new(registry).evaluate(expr, raw)
            }
            EvaluationStrategy::Rule(rule) => rule.test(raw).unwrap_or(false),
        }
    }

    /// Render the hidden rule for debugging or hint display.
    #[must_use]
    pub fn describe_rule(&self) -> String {
        match &self.strategy {
            EvaluationStrategy::Rule(rule) => rule.id().to_string(),
            EvaluationStrategy::Logic { expr, .. } => expr.to_string(),
        }
    }

    /// Check a player's classification of the validation cases.
    ///
    /// All-or-nothing and index-aligned: `answers[i]` must equal the
    /// expectation of case `i`, and the lengths must match.
    #[must_use]
    pub fn validate_answers(&self, answers: &[bool]) -> bool {
        answers.len() == self.validation_cases.len()
            && self
                .validation_cases
                .iter()
                .zip(answers)
                .all(|(case, answer)| case.expected == *answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleId;

    fn registry() -> Arc<RuleRegistry> {
        Arc::new(RuleRegistry::standard())
    }

    #[test]
    fn test_unknown_rule_fails_construction() {
        let err = Puzzle::from_rule("p1", "P1", &registry(), "isPrime").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownRule { ref rule_id, .. } if *rule_id == RuleId::new("isPrime")
        ));
    }

    #[test]
    fn test_unknown_rule_in_logic_fails_construction() {
        let expr = LogicExpr::all([LogicExpr::rule("isEven"), LogicExpr::rule("isPrime").negate()]);
        let err = Puzzle::from_logic("p1", "P1", registry(), expr, vec![ValidationCase::new("2", true)])
            .unwrap_err();

        assert_eq!(err.to_string(), "puzzle p1 references unknown rule isPrime");
    }

    #[test]
    fn test_logic_requires_validation_cases() {
        let err = Puzzle::from_logic("p1", "P1", registry(), LogicExpr::rule("isEven"), vec![])
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingValidationCases { .. }));
    }

    #[test]
    fn test_rule_strategy_check() {
        let puzzle = Puzzle::from_rule("even", "Even", &registry(), "isEven").unwrap();

        assert_eq!(
            puzzle.check("4").unwrap(),
            Evaluation { input: ParsedValue::Number(4.0), result: true }
        );
        assert_eq!(puzzle.check("7").unwrap().result, false);
        assert_eq!(
            puzzle.check("abc").unwrap_err(),
            AttemptError::InputInvalid { raw: "abc".to_string() }
        );
    }

    #[test]
    fn test_logic_strategy_check() {
        let expr = LogicExpr::all([LogicExpr::rule("isPositive"), LogicExpr::rule("divisibleBy3")]);
        let puzzle = Puzzle::from_logic(
            "pos3",
            "Positive threes",
            registry(),
            expr,
            vec![ValidationCase::new("9", true), ValidationCase::new("-9", false)],
        )
        .unwrap();

        assert!(puzzle.is_valid_input("9"));
        assert!(!puzzle.is_valid_input("-9"));
        assert!(!puzzle.is_valid_input("4"));

        // Unparseable for every leaf, but still a recorded (false) attempt
        let eval = puzzle.check("abc").unwrap();
        assert_eq!(eval.input, ParsedValue::Text("abc".to_string()));
        assert!(!eval.result);

        assert!(puzzle.check("  ").is_err());
        assert_eq!(puzzle.describe_rule(), "(isPositive AND divisibleBy3)");
    }

    #[test]
    fn test_builder_metadata() {
        let puzzle = Puzzle::from_rule("word", "Words", &registry(), "evenWordLength")
            .unwrap()
            .with_description("Try words.")
            .with_difficulty(Difficulty::Medium)
            .with_hints(["a", "b"])
            .with_validation_cases(vec![ValidationCase::new("aa", true)])
            .with_reveal(Reveal::new("Even length.").with_title("The rule was...").with_example("aa", true));

        assert_eq!(puzzle.id().as_str(), "word");
        assert_eq!(puzzle.title(), "Words");
        assert_eq!(puzzle.description(), Some("Try words."));
        assert_eq!(puzzle.difficulty(), Difficulty::Medium);
        assert_eq!(puzzle.hints(), ["a".to_string(), "b".to_string()]);
        assert_eq!(puzzle.validation_cases().len(), 1);
        assert_eq!(puzzle.reveal().title.as_deref(), Some("The rule was..."));
        assert_eq!(puzzle.reveal().examples.len(), 1);
        assert_eq!(puzzle.describe_rule(), "evenWordLength");
    }

    #[test]
    fn test_validate_answers() {
        let puzzle = Puzzle::from_rule("even", "Even", &registry(), "isEven")
            .unwrap()
            .with_validation_cases(vec![ValidationCase::new(2, true), ValidationCase::new(3, false)]);

        assert!(puzzle.validate_answers(&[true, false]));
        assert!(!puzzle.validate_answers(&[true, true]));
        assert!(!puzzle.validate_answers(&[false, true]));
        assert!(!puzzle.validate_answers(&[true]));
        assert!(!puzzle.validate_answers(&[true, false, false]));
        assert!(!puzzle.validate_answers(&[]));
    }

    #[test]
    fn test_difficulty_serde() {
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
    }
}
