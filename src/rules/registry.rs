//! Rule registry for predicate lookup.
//!
//! The `RuleRegistry` is assembled once at startup and then only read.
//! Puzzles and the logic evaluator take it as an explicit dependency,
//! so independent registries (one per test, say) can coexist.

use rustc_hash::FxHashMap;

use crate::error::RuleError;

use super::catalogue;
use super::rule::{Rule, RuleId};

/// Registry of rules, keyed by name.
///
/// ## Example
///
/// ```
/// use rule_game::rules::RuleRegistry;
///
/// let registry = RuleRegistry::standard();
///
/// let even = registry.lookup("isEven").unwrap();
/// assert_eq!(even.test("4"), Some(true));
///
/// assert!(registry.lookup("isPrime").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: FxHashMap<RuleId, Rule>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard catalogue.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for rule in catalogue::standard_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Register a rule.
    ///
    /// Panics if a rule with the same name already exists.
    pub fn register(&mut self, rule: Rule) {
        if self.rules.contains_key(rule.id()) {
            panic!("Rule {} already registered", rule.id());
        }
        self.rules.insert(rule.id().clone(), rule);
    }

    /// Register a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.register(rule);
        self
    }

    /// Get a rule by name.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Get a rule by name, reporting a miss as an error.
    pub fn lookup(&self, id: &str) -> Result<&Rule, RuleError> {
        self.get(id).ok_or_else(|| RuleError::NotFound {
            rule_id: RuleId::new(id),
        })
    }

    /// Check if a rule name is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Get the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over all rules, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// All rule names, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&RuleId> {
        let mut ids: Vec<_> = self.rules.keys().collect();
        ids.sort();
        ids
    }
}
