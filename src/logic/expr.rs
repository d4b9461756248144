//! Logic expressions.
//!
//! A `LogicExpr` is an immutable tree whose leaves test registry rules and
//! whose inner nodes combine them with AND / OR / XOR / NOT. Trees are built
//! from acyclic content, so evaluation always terminates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::rules::RuleId;

/// A leaf test: apply a rule to the input.
///
/// `arg`, when present, is parsed instead of the player's raw input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTest {
    #[serde(rename = "ruleId")]
    pub rule_id: RuleId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

impl RuleTest {
    /// Test a rule against the player's input.
    #[must_use]
    pub fn new(rule_id: impl Into<RuleId>) -> Self {
        Self {
            rule_id: rule_id.into(),
            arg: None,
        }
    }

    /// Test a rule against a fixed literal instead.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }
}

/// A boolean expression over rule tests.
///
/// JSON shape: `{"op": "and", "exprs": [{"op": "test", "test": {"ruleId": "isEven"}}]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum LogicExpr {
    /// Leaf rule test.
    Test { test: RuleTest },

    /// Negation.
    Not { expr: Box<LogicExpr> },

    /// All children true. Empty is `true`.
    And { exprs: Vec<LogicExpr> },

    /// Any child true. Empty is `false`.
    Or { exprs: Vec<LogicExpr> },

    /// Odd number of children true. Empty is `false`.
    Xor { exprs: Vec<LogicExpr> },
}

impl LogicExpr {
    /// Create a leaf testing `rule_id` against the player's input.
    #[must_use]
    pub fn rule(rule_id: impl Into<RuleId>) -> Self {
        Self::Test {
            test: RuleTest::new(rule_id),
        }
    }

    /// Create a leaf testing `rule_id` against a literal.
    #[must_use]
    pub fn rule_with_arg(rule_id: impl Into<RuleId>, arg: impl Into<String>) -> Self {
        Self::Test {
            test: RuleTest::new(rule_id).with_arg(arg),
        }
    }

    /// Create an AND node.
    pub fn all(exprs: impl IntoIterator<Item = LogicExpr>) -> Self {
        Self::And {
            exprs: exprs.into_iter().collect(),
        }
    }

    /// Create an OR node.
    pub fn any(exprs: impl IntoIterator<Item = LogicExpr>) -> Self {
        Self::Or {
            exprs: exprs.into_iter().collect(),
        }
    }

    /// Create an XOR node.
    pub fn xor(exprs: impl IntoIterator<Item = LogicExpr>) -> Self {
        Self::Xor {
            exprs: exprs.into_iter().collect(),
        }
    }

    /// Negate this expression.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not {
            expr: Box::new(self),
        }
    }

    /// Every rule referenced by a leaf, depth-first, left to right.
    #[must_use]
    pub fn rule_ids(&self) -> SmallVec<[&RuleId; 4]> {
        let mut ids = SmallVec::new();
        self.collect_rule_ids(&mut ids);
        ids
    }

    fn collect_rule_ids<'a>(&'a self, out: &mut SmallVec<[&'a RuleId; 4]>) {
        match self {
            Self::Test { test } => out.push(&test.rule_id),
            Self::Not { expr } => expr.collect_rule_ids(out),
            Self::And { exprs } | Self::Or { exprs } | Self::Xor { exprs } => {
                for expr in exprs {
                    expr.collect_rule_ids(out);
                }
            }
        }
    }

    /// Height of the tree. A single leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Test { .. } => 1,
            Self::Not { expr } => 1 + expr.depth(),
            Self::And { exprs } | Self::Or { exprs } | Self::Xor { exprs } => {
                1 + exprs.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Infix rendering: `(isPositive AND NOT(isEven))`.
///
/// Mirrors the tree shape and child order, not any source text.
impl std::fmt::Display for LogicExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (keyword, exprs) = match self {
            Self::Test { test } => {
                return match &test.arg {
                    Some(arg) => write!(f, "{}({})", test.rule_id, arg),
                    None => write!(f, "{}", test.rule_id),
                };
            }
            Self::Not { expr } => return write!(f, "NOT({expr})"),
            Self::And { exprs } => ("AND", exprs),
            Self::Or { exprs } => ("OR", exprs),
            Self::Xor { exprs } => ("XOR", exprs),
        };

        f.write_str("(")?;
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                write!(f, " {keyword} ")?;
            }
            write!(f, "{expr}")?;
        }
        f.write_str(")")
    }
}

/// How a combined rule joins its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

/// Shorthand content form: a flat AND/OR over rule names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRuleDef {
    pub rules: Vec<RuleId>,
    pub condition: Combinator,
}

impl CombinedRuleDef {
    /// Expand into a full expression tree.
    #[must_use]
    pub fn compile(&self) -> LogicExpr {
        let leaves = self.rules.iter().cloned().map(LogicExpr::rule);
        match self.condition {
            Combinator::And => LogicExpr::all(leaves),
            Combinator::Or => LogicExpr::any(leaves),
        }
    }
}
