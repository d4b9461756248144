//! Rule definitions - named predicates over parsed player input.
//!
//! A `Rule` pairs a parser (raw text to [`ParsedValue`]) with an evaluator
//! (parsed value to `bool`). Parsers return `None` for malformed input and
//! never panic, so nothing downstream ever sees a parse failure as an error.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Unique name of a rule, e.g. `isEven`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A typed value produced by a rule's parser.
///
/// Serialized untagged: JSON numbers become `Number`, JSON strings `Text`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedValue {
    Number(f64),
    Text(String),
}

impl ParsedValue {
    /// Get the numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Get the text value, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl std::fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParsedValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ParsedValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for ParsedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParsedValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// An input paired with the answer a player must give for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationCase {
    pub input: ParsedValue,
    pub expected: bool,
}

impl ValidationCase {
    /// Create a new validation case.
    #[must_use]
    pub fn new(input: impl Into<ParsedValue>, expected: bool) -> Self {
        Self {
            input: input.into(),
            expected,
        }
    }
}

/// Raw text to typed value. `None` means the text is unparseable.
pub type ParseFn = fn(&str) -> Option<ParsedValue>;

/// Typed value to verdict.
pub type EvalFn = fn(&ParsedValue) -> bool;

/// A named predicate.
///
/// ## Example
///
/// ```
/// use rule_game::rules::{parse_number, ParsedValue, Rule};
///
/// let even = Rule::new("isEven", parse_number, |v| {
///     v.as_number().is_some_and(|n| n % 2.0 == 0.0)
/// })
/// .with_sample_inputs([1, 2, 3]);
///
/// assert_eq!(even.test("4"), Some(true));
/// assert_eq!(even.test("abc"), None);
/// assert_eq!(even.validation_cases().len(), 3);
/// assert!(even.validation_cases()[1].expected);
/// ```
#[derive(Clone)]
pub struct Rule {
    id: RuleId,
    parse: ParseFn,
    evaluate: EvalFn,
    validation_cases: Vec<ValidationCase>,
}

impl Rule {
    /// Create a rule with no validation cases.
    #[must_use]
    pub fn new(id: impl Into<RuleId>, parse: ParseFn, evaluate: EvalFn) -> Self {
        Self {
            id: id.into(),
            parse,
            evaluate,
            validation_cases: Vec::new(),
        }
    }

    /// Add a validation case with an explicit expectation.
    #[must_use]
    pub fn with_case(mut self, input: impl Into<ParsedValue>, expected: bool) -> Self {
        self.validation_cases.push(ValidationCase::new(input, expected));
        self
    }

    /// Add validation cases whose expectation is this rule's own verdict.
    #[must_use]
    pub fn with_sample_inputs<V>(mut self, inputs: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<ParsedValue>,
    {
        for input in inputs {
            let input = input.into();
            let expected = (self.evaluate)(&input);
            self.validation_cases.push(ValidationCase { input, expected });
        }
        self
    }

    /// The rule's name.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Parse raw text into this rule's value type.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<ParsedValue> {
        (self.parse)(raw)
    }

    /// Apply the predicate to an already-parsed value.
    #[must_use]
    pub fn evaluate(&self, value: &ParsedValue) -> bool {
        (self.evaluate)(value)
    }

    /// Parse then evaluate. `None` if the text does not parse.
    #[must_use]
    pub fn test(&self, raw: &str) -> Option<bool> {
        self.parse(raw).map(|value| self.evaluate(&value))
    }

    /// The canned cases used to check a player's understanding.
    #[must_use]
    pub fn validation_cases(&self) -> &[ValidationCase] {
        &self.validation_cases
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("validation_cases", &self.validation_cases)
            .finish_non_exhaustive()
    }
}

/// Parse trimmed decimal text into a finite number.
#[must_use]
pub fn parse_number(raw: &str) -> Option<ParsedValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(ParsedValue::Number)
}

/// Accept any non-blank text, trimmed.
#[must_use]
pub fn parse_word(raw: &str) -> Option<ParsedValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(ParsedValue::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id() {
        let id = RuleId::new("isEven");
        assert_eq!(id.as_str(), "isEven");
        assert_eq!(format!("{}", id), "isEven");
        assert_eq!(RuleId::from("isEven"), id);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("4"), Some(ParsedValue::Number(4.0)));
        assert_eq!(parse_number("  -9 "), Some(ParsedValue::Number(-9.0)));
        assert_eq!(parse_number("2.5"), Some(ParsedValue::Number(2.5)));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word(" casa "), Some(ParsedValue::Text("casa".to_string())));
        assert_eq!(parse_word("buen dia"), Some(ParsedValue::Text("buen dia".to_string())));
        assert_eq!(parse_word("  "), None);
    }

    #[test]
    fn test_parsed_value_accessors() {
        let n = ParsedValue::from(7);
        assert_eq!(n.as_number(), Some(7.0));
        assert_eq!(n.as_text(), None);
        assert_eq!(n.to_string(), "7");

        let t = ParsedValue::from("sol");
        assert_eq!(t.as_text(), Some("sol"));
        assert_eq!(t.as_number(), None);
        assert_eq!(t.to_string(), "sol");
    }

    #[test]
    fn test_parsed_value_untagged_json() {
        let values: Vec<ParsedValue> = serde_json::from_str(r#"[1, "hola", 2.5]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ParsedValue::Number(1.0),
                ParsedValue::Text("hola".to_string()),
                ParsedValue::Number(2.5),
            ]
        );
    }

    #[test]
    fn test_sample_inputs_use_own_verdict() {
        let positive = Rule::new("isPositive", parse_number, |v| {
            v.as_number().is_some_and(|n| n > 0.0)
        })
        .with_sample_inputs([-1, 0, 5]);

        let expected: Vec<bool> = positive.validation_cases().iter().map(|c| c.expected).collect();
        assert_eq!(expected, vec![false, false, true]);
    }

    #[test]
    fn test_rule_test() {
        let rule = Rule::new("nonEmpty", parse_word, |_| true).with_case("x", true);
        assert_eq!(rule.test("hello"), Some(true));
        assert_eq!(rule.test(""), None);
        assert_eq!(rule.id().as_str(), "nonEmpty");
        assert_eq!(rule.validation_cases().len(), 1);
    }
}
