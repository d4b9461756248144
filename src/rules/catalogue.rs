//! The standard rule catalogue.
//!
//! Numeric rules parse with [`parse_number`]; word rules with [`parse_word`].
//! Every evaluator returns `false` for a value of the wrong kind.

use super::rule::{parse_number, parse_word, ParsedValue, Rule};

fn number(value: &ParsedValue, predicate: impl Fn(f64) -> bool) -> bool {
    value.as_number().is_some_and(predicate)
}

fn text(value: &ParsedValue, predicate: impl Fn(&str) -> bool) -> bool {
    value.as_text().is_some_and(predicate)
}

fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next(),
        Some('a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú')
    )
}

/// Build every rule in the standard catalogue.
#[must_use]
pub fn standard_rules() -> Vec<Rule> {
    vec![
        // === Numeric ===
        Rule::new("isEven", parse_number, |v| number(v, |n| n % 2.0 == 0.0))
            .with_sample_inputs([1, 2, 3, 4, 5, 6]),
        Rule::new("isOdd", parse_number, |v| number(v, |n| n.abs() % 2.0 == 1.0))
            .with_sample_inputs([1, 2, 3, 4, 5, 6]),
        Rule::new("greaterThanFive", parse_number, |v| number(v, |n| n > 5.0))
            .with_sample_inputs([3, 5, 6, 10]),
        Rule::new("isPositive", parse_number, |v| number(v, |n| n > 0.0))
            .with_sample_inputs([-3, 0, 1, 9]),
        Rule::new("isNegative", parse_number, |v| number(v, |n| n < 0.0))
            .with_sample_inputs([-7, -1, 0, 4]),
        Rule::new("divisibleBy3", parse_number, |v| number(v, |n| n % 3.0 == 0.0))
            .with_sample_inputs([3, 4, 9, 10, 12]),
        // === Text ===
        Rule::new("evenWordLength", parse_word, |v| text(v, |s| s.chars().count() % 2 == 0))
            .with_sample_inputs(["a", "aa", "hola", "perro"]),
        Rule::new("startsWithVowel", parse_word, |v| {
            text(v, |s| s.chars().next().is_some_and(is_vowel))
        })
        .with_sample_inputs(["arbol", "casa", "isla", "mate", "uva"]),
        Rule::new("allUppercase", parse_word, |v| {
            text(v, |s| {
                s.chars().any(char::is_alphabetic)
                    && s.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
            })
        })
        .with_sample_inputs(["HOLA", "Hola", "SOL 2", "42", "mAte"]),
        Rule::new("hasDigit", parse_word, |v| text(v, |s| s.chars().any(|c| c.is_ascii_digit())))
            .with_sample_inputs(["abc", "a1", "2024", "sol"]),
        Rule::new("isPalindrome", parse_word, |v| {
            text(v, |s| {
                let folded: Vec<char> = s
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .collect();
                !folded.is_empty() && folded.iter().eq(folded.iter().rev())
            })
        })
        .with_sample_inputs(["ana", "Neuquen", "sol", "oso", "Anita lava la tina"]),
    ]
}
