//! Rule system: named predicates and their registry.
//!
//! ## Key Types
//!
//! - `RuleId`: Unique rule name
//! - `ParsedValue`: Typed value produced by a rule's parser
//! - `ValidationCase`: Input plus the answer a player must give
//! - `Rule`: Parser + evaluator + canned validation cases
//! - `RuleRegistry`: Immutable lookup table built at startup
//!
//! Rules never fail loudly during play: a parser returns `None` for text it
//! cannot read, and an evaluator returns `false` for a value of the wrong kind.

pub mod catalogue;
pub mod registry;
pub mod rule;

pub use catalogue::standard_rules;
pub use registry::RuleRegistry;
pub use rule::{parse_number, parse_word, EvalFn, ParseFn, ParsedValue, Rule, RuleId, ValidationCase};
