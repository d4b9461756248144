//! Declarative boolean logic over registry rules.
//!
//! Puzzles that need more than one rule describe their secret as a
//! [`LogicExpr`] tree. The [`LogicEvaluator`] walks that tree against the
//! player's raw input, parsing separately at each leaf.
//!
//! ## Example
//!
//! ```
//! use rule_game::logic::{LogicEvaluator, LogicExpr};
//! use rule_game::rules::RuleRegistry;
//!
//! let registry = RuleRegistry::standard();
//! let eval = LogicEvaluator::new(&registry);
//!
//! let expr = LogicExpr::all([
//!     LogicExpr::rule("isPositive"),
//!     LogicExpr::rule("divisibleBy3"),
//! ]);
//!
//! assert!(eval.evaluate(&expr, "9"));
//! assert!(!eval.evaluate(&expr, "-9"));
//! assert!(!eval.evaluate(&expr, "4"));
//! assert_eq!(expr.to_string(), "(isPositive AND divisibleBy3)");
//! ```

mod evaluator;
mod expr;

pub use evaluator::LogicEvaluator;
pub use expr::{CombinedRuleDef, Combinator, LogicExpr, RuleTest};
