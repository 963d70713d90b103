//! Coercion of atomic rule values.
//!
//! The raw text to the right of a rule's colon becomes a [`StyleValue`]:
//!
//! | Raw text | Result |
//! |----------|--------|
//! | `"red"` or `'red'` | `String("red")`, one layer of quotes stripped |
//! | `20`, `0.5`, `.5` | `Number` |
//! | empty | `Number(0.0)` |
//! | anything else (`20px`, `-1`, `100%`) | `String`, verbatim |
//!
//! Quote stripping needs an actual pair: a value that is a lone `"` or `'`
//! is kept verbatim. A plain `startsWith`/`endsWith` check would accept the
//! single character as both quotes and yield an empty string; that reading
//! is deliberately not followed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::object::StyleValue;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*(\.[0-9]+)?$").expect("valid number pattern"));

/// Coerces the raw (already trimmed) value text of an atomic rule.
///
/// # Example
///
/// ```
/// use stylesmith::{parse_atomic_value, StyleValue};
///
/// assert_eq!(parse_atomic_value("10"), StyleValue::Number(10.0));
/// assert_eq!(parse_atomic_value("'bold'"), StyleValue::from("bold"));
/// assert_eq!(parse_atomic_value("20px"), StyleValue::from("20px"));
/// ```
pub fn parse_atomic_value(raw: &str) -> StyleValue {
    if let Some(inner) = strip_quotes(raw) {
        return StyleValue::String(inner.to_string());
    }

    if NUMBER.is_match(raw) {
        // The pattern admits the empty string; it counts as zero.
        let n = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>().unwrap_or(0.0)
        };
        return StyleValue::Number(n);
    }

    StyleValue::String(raw.to_string())
}

/// Strips exactly one layer of matching double or single quotes.
fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find_map(|q| raw.strip_prefix(q)?.strip_suffix(q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_strings_lose_one_layer() {
        assert_eq!(parse_atomic_value("\"red\""), StyleValue::from("red"));
        assert_eq!(parse_atomic_value("'red'"), StyleValue::from("red"));
        assert_eq!(parse_atomic_value("\"'red'\""), StyleValue::from("'red'"));
        assert_eq!(parse_atomic_value("\"\""), StyleValue::from(""));
    }

    #[test]
    fn quoted_numbers_stay_strings() {
        assert_eq!(parse_atomic_value("\"12\""), StyleValue::from("12"));
    }

    #[test]
    fn mismatched_or_lone_quotes_are_verbatim() {
        assert_eq!(parse_atomic_value("\"red'"), StyleValue::from("\"red'"));
        assert_eq!(parse_atomic_value("\""), StyleValue::from("\""));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_atomic_value("10"), StyleValue::Number(10.0));
        assert_eq!(parse_atomic_value("0.5"), StyleValue::Number(0.5));
        assert_eq!(parse_atomic_value(".5"), StyleValue::Number(0.5));
        assert_eq!(parse_atomic_value("007"), StyleValue::Number(7.0));
    }

    #[test]
    fn empty_value_is_zero() {
        assert_eq!(parse_atomic_value(""), StyleValue::Number(0.0));
    }

    #[test]
    fn non_numeric_text_is_verbatim() {
        assert_eq!(parse_atomic_value("20px"), StyleValue::from("20px"));
        assert_eq!(parse_atomic_value("100%"), StyleValue::from("100%"));
        assert_eq!(parse_atomic_value("-1"), StyleValue::from("-1"));
        assert_eq!(parse_atomic_value("1."), StyleValue::from("1."));
        assert_eq!(parse_atomic_value("1e3"), StyleValue::from("1e3"));
    }
}
