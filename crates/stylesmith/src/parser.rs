//! Line-oriented parser turning resolved style text into a [`StyleObject`].
//!
//! # Grammar
//!
//! Each non-blank line, after trimming, is one of:
//!
//! ```text
//! placeholder-line := "###VALUE:" DIGITS "###"
//! atomic-rule      := IDENT ":" VALUE (";")?
//! block-open       := SELECTOR-TEXT "{"
//! block-close      := "}"
//! IDENT            := [a-z0-9-]+   (case-insensitive)
//! ```
//!
//! Forms are tested in that order. Because rules are tested before blocks,
//! a selector that starts like `key:` (e.g. `a:hover {`) is read as a rule;
//! selectors such as `:hover` or `@media print` are unaffected.
//!
//! # State
//!
//! The parser keeps a stack of open blocks, with the root mapping at the
//! bottom. Rules and merged objects go into the block on top; `{` pushes a new
//! block, `}` pops one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::atomic::parse_atomic_value;
use crate::error::{Result, StyleError};
use crate::object::StyleObject;
use crate::tree::{NodeId, StyleTree};
use crate::value::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"###VALUE:([0-9]+)###").expect("valid placeholder pattern"));

static ATOMIC_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9-]+\s*:").expect("valid rule pattern"));

/// A classified, trimmed line with its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// `token` is the full placeholder match, `index` its digits.
    Placeholder {
        token: &'a str,
        index: &'a str,
    },
    Rule {
        key: &'a str,
        value: &'a str,
    },
    Open {
        selector: &'a str,
    },
    Close,
    Unknown,
}

/// Returns `true` for the characters ECMAScript `trim` removes: Unicode
/// whitespace (except U+0085) plus the byte order mark U+FEFF.
fn is_trim_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Trims surrounding whitespace, including a byte order mark.
fn trim_line(line: &str) -> &str {
    line.trim_matches(is_trim_char)
}

/// Classifies a trimmed line.
pub(crate) fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = PLACEHOLDER.captures(line) {
        if let (Some(token), Some(index)) = (caps.get(0), caps.get(1)) {
            return Line::Placeholder {
                token: token.as_str(),
                index: index.as_str(),
            };
        }
    }

    if ATOMIC_RULE.is_match(line) {
        if let Some((key, value)) = line.split_once(':') {
            return Line::Rule {
                key: trim_line(key),
                value: trim_line(value),
            };
        }
    }

    if line.contains('{') {
        let selector = trim_line(line.strip_suffix('{').unwrap_or(line));
        return Line::Open { selector };
    }

    if line == "}" {
        return Line::Close;
    }

    Line::Unknown
}

/// Options controlling how style text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop a single line break at the very start of the text, so that line 1
    /// is the first line the author actually wrote. Defaults to `true`.
    pub strip_leading_newline: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strip_leading_newline: true,
        }
    }
}

/// Parser for resolved style text.
///
/// Holds the interpolated values that placeholder lines refer to.
///
/// # Example
///
/// ```
/// use stylesmith::{StyleObject, StyleParser, Value};
///
/// let values = [Value::from(StyleObject::from_iter([("color", "red")]))];
/// let styles = StyleParser::new(&values).parse("
///   margin: 0
///   :hover {
///     ####VALUE:0###
///   }
/// ")?;
///
/// assert_eq!(styles.to_json(), serde_json::json!({
///     "margin": 0,
///     ":hover": { "color": "red" }
/// }));
/// # Ok::<(), stylesmith::StyleError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StyleParser<'v> {
    values: &'v [Value],
    options: ParseOptions,
}

impl<'v> StyleParser<'v> {
    /// Creates a parser resolving placeholders against `values`.
    pub fn new(values: &'v [Value]) -> Self {
        StyleParser {
            values,
            options: ParseOptions::default(),
        }
    }

    /// Replaces the parse options.
    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets whether a single leading line break is dropped.
    pub fn strip_leading_newline(mut self, strip: bool) -> Self {
        self.options.strip_leading_newline = strip;
        self
    }

    /// Parses `text` into a style object.
    ///
    /// # Errors
    ///
    /// Line-level failures come back as [`StyleError::AtLine`] carrying the
    /// 1-based line number. [`StyleError::UnclosedBraces`] is reported without
    /// a line number.
    pub fn parse(&self, text: &str) -> Result<StyleObject> {
        let text = match text.strip_prefix('\n') {
            Some(rest) if self.options.strip_leading_newline => rest,
            _ => text,
        };

        tracing::debug!(target: "stylesmith::parser", len = text.len(), "parsing style text");

        let mut state = ParseState::new(self.values);
        for (line_index, line) in text.split('\n').enumerate() {
            state.parse_line(line).map_err(|err| {
                tracing::debug!(
                    target: "stylesmith::parser",
                    line = line_index + 1,
                    error = %err,
                    "style line rejected"
                );
                err.at_line(line_index + 1)
            })?;
        }

        state.finish()
    }
}

/// Mutable state of one parse call.
struct ParseState<'v> {
    values: &'v [Value],
    tree: StyleTree,
    stack: Vec<NodeId>,
}

impl<'v> ParseState<'v> {
    fn new(values: &'v [Value]) -> Self {
        let tree = StyleTree::new();
        let stack = vec![tree.root()];
        ParseState {
            values,
            tree,
            stack,
        }
    }

    fn current(&self) -> Result<NodeId> {
        self.stack
            .last()
            .copied()
            .ok_or(StyleError::UnbalancedBraces)
    }

    fn parse_line(&mut self, raw: &str) -> Result<()> {
        let line = trim_line(raw);
        let kind = classify(line);
        tracing::trace!(target: "stylesmith::parser", ?kind, depth = self.stack.len(), "line");

        match kind {
            Line::Blank => Ok(()),
            Line::Placeholder { token, index } => self.merge_placeholder(line, token, index),
            Line::Rule { key, value } => self.assign_rule(key, value),
            Line::Open { selector } => self.open_block(selector),
            Line::Close => self.close_block(),
            Line::Unknown => Err(StyleError::UnparseableLine {
                line: line.to_string(),
            }),
        }
    }

    fn merge_placeholder(&mut self, line: &str, token: &str, index: &str) -> Result<()> {
        if line.len() > token.len() {
            return Err(StyleError::MultipleStatementsOnLine);
        }

        let values = self.values;
        let object = index
            .parse::<usize>()
            .ok()
            .and_then(|i| values.get(i))
            .and_then(Value::as_object)
            .ok_or_else(|| StyleError::MissingObjectValue {
                placeholder: token.to_string(),
            })?;

        let target = self.current()?;
        self.tree.merge(target, object);
        Ok(())
    }

    fn assign_rule(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value
            .strip_suffix(';')
            .unwrap_or(value)
            .trim_end_matches(is_trim_char);
        let target = self.current()?;
        self.tree.set_value(target, key, parse_atomic_value(value));
        Ok(())
    }

    fn open_block(&mut self, selector: &str) -> Result<()> {
        let parent = self.current()?;
        let child = self.tree.open_child(parent, selector);
        self.stack.push(child);
        tracing::trace!(
            target: "stylesmith::parser",
            selector,
            depth = self.stack.len(),
            "opened block"
        );
        Ok(())
    }

    fn close_block(&mut self) -> Result<()> {
        self.stack.pop();
        if self.stack.is_empty() {
            return Err(StyleError::UnbalancedBraces);
        }
        tracing::trace!(
            target: "stylesmith::parser",
            depth = self.stack.len(),
            "closed block"
        );
        Ok(())
    }

    fn finish(self) -> Result<StyleObject> {
        if self.stack.len() > 1 {
            tracing::debug!(
                target: "stylesmith::parser",
                open = self.stack.len() - 1,
                "unclosed blocks at end of input"
            );
            return Err(StyleError::UnclosedBraces);
        }
        Ok(self.tree.into_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::StyleValue;
    use serde_json::json;

    fn parse(text: &str) -> Result<StyleObject> {
        StyleParser::new(&[]).parse(text)
    }

    #[test]
    fn classify_forms() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(
            classify("###VALUE:12###"),
            Line::Placeholder {
                token: "###VALUE:12###",
                index: "12"
            }
        );
        assert_eq!(
            classify("text-transform :  uppercase"),
            Line::Rule {
                key: "text-transform",
                value: "uppercase"
            }
        );
        assert_eq!(
            classify("@media print {"),
            Line::Open {
                selector: "@media print"
            }
        );
        assert_eq!(classify("}"), Line::Close);
        assert_eq!(classify("color red"), Line::Unknown);
    }

    #[test]
    fn rule_pattern_is_case_insensitive() {
        assert_eq!(
            classify("Background-Color: red"),
            Line::Rule {
                key: "Background-Color",
                value: "red"
            }
        );
    }

    #[test]
    fn rule_splits_at_first_colon() {
        assert_eq!(
            classify("background: url(http://x)"),
            Line::Rule {
                key: "background",
                value: "url(http://x)"
            }
        );
    }

    #[test]
    fn placeholder_wins_over_rule() {
        assert!(matches!(
            classify("color: ###VALUE:0###"),
            Line::Placeholder { .. }
        ));
    }

    #[test]
    fn rule_wins_over_block_open() {
        assert_eq!(
            classify("a:hover {"),
            Line::Rule {
                key: "a",
                value: "hover {"
            }
        );
    }

    #[test]
    fn brace_inside_selector_is_kept() {
        assert_eq!(
            classify("a { b"),
            Line::Open { selector: "a { b" }
        );
    }

    #[test]
    fn trailing_semicolon_is_stripped_once() {
        let styles = parse("color: red;\nmargin: 20;\nx: a;;").unwrap();
        assert_eq!(
            styles.to_json(),
            json!({ "color": "red", "margin": 20, "x": "a;" })
        );
    }

    #[test]
    fn later_rule_overwrites_earlier() {
        let styles = parse("color: red\ncolor: blue").unwrap();
        assert_eq!(styles.get("color"), Some(&StyleValue::from("blue")));
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn empty_rule_value_is_zero() {
        let styles = parse("width:").unwrap();
        assert_eq!(styles.get("width"), Some(&StyleValue::Number(0.0)));
    }

    #[test]
    fn leading_newline_toggle_shifts_line_numbers() {
        let text = "\ncolor red";
        let err = StyleParser::new(&[]).parse(text).unwrap_err();
        assert_eq!(err.line(), Some(1));

        let err = StyleParser::new(&[])
            .strip_leading_newline(false)
            .parse(text)
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn only_one_leading_newline_is_stripped() {
        let err = parse("\n\n}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Too many closing curly braces. (Style line 2)"
        );
    }

    #[test]
    fn carriage_returns_are_trimmed_per_line() {
        let styles = parse("a: 1\r\nb: 2\r\n").unwrap();
        assert_eq!(styles.to_json(), json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(trim_line("\u{feff}  color: red \u{feff}"), "color: red");
        let styles = parse("\u{feff}color: red\n\u{feff}:hover {\n}\u{feff}").unwrap();
        assert_eq!(
            styles.to_json(),
            json!({ "color": "red", ":hover": {} })
        );
    }

    #[test]
    fn next_line_character_is_not_trimmed() {
        assert_eq!(trim_line("\u{85}x\u{85}"), "\u{85}x\u{85}");
    }

    #[test]
    fn missing_placeholder_value() {
        let err = parse("###VALUE:3###").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No object value for placeholder \"###VALUE:3###\". (Style line 1)"
        );
    }

    #[test]
    fn placeholder_pointing_at_primitive_is_rejected() {
        let values = [Value::from("red")];
        let err = StyleParser::new(&values)
            .parse("###VALUE:0###")
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            StyleError::MissingObjectValue { .. }
        ));
    }

    #[test]
    fn unclosed_block_has_no_line() {
        let err = parse(":hover {\n  color: red").unwrap_err();
        assert_eq!(err, StyleError::UnclosedBraces);
    }

    #[test]
    fn empty_text_is_empty_object() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n   \n\t\n").unwrap().is_empty());
    }
}
