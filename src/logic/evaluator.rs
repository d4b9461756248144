//! Logic expression evaluation.
//!
//! Evaluation is a pure depth-first walk. Leaves resolve their rule in the
//! registry the evaluator was built with; an unknown rule or an unparseable
//! input makes the leaf `false` rather than failing the whole evaluation.

use tracing::debug;

use crate::rules::RuleRegistry;

use super::expr::{LogicExpr, RuleTest};

/// Evaluates expressions against a fixed registry.
#[derive(Clone, Copy, Debug)]
pub struct LogicEvaluator<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> LogicEvaluator<'a> {
    /// Create an evaluator over `registry`.
    #[must_use]
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate `expr` against the player's raw input.
    #[must_use]
    pub fn evaluate(&self, expr: &LogicExpr, raw: &str) -> bool {
        match expr {
            LogicExpr::Test { test } => self.evaluate_test(test, raw),

            LogicExpr::Not { expr } => !self.evaluate(expr, raw),

            LogicExpr::And { exprs } => exprs.iter().all(|e| self.evaluate(e, raw)),

            LogicExpr::Or { exprs } => exprs.iter().any(|e| self.evaluate(e, raw)),

            LogicExpr::Xor { exprs } => {
                exprs.iter().filter(|e| self.evaluate(e, raw)).count() % 2 == 1
            }
        }
    }

    /// Evaluate a single leaf.
    #[must_use]
    pub fn evaluate_test(&self, test: &RuleTest, raw: &str) -> bool {
        let Some(rule) = self.registry.get(test.rule_id.as_str()) else {
            debug!(rule_id = %test.rule_id, "logic test references unknown rule");
            return false;
        };

        let input = test.arg.as_deref().unwrap_or(raw);
        rule.test(input).unwrap_or(false)
    }
}
