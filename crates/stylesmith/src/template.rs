//! Builder for the literal-fragment / value pair.
//!
//! [`Template`] collects text and values in reading order and always holds
//! exactly one more fragment than values, so it can be handed straight to
//! [`resolve`](crate::resolve) or parsed directly.

use crate::error::Result;
use crate::object::StyleObject;
use crate::parser::StyleParser;
use crate::resolve::resolve;
use crate::value::Value;

/// Interleaved style text and interpolated values.
///
/// # Example
///
/// ```
/// use stylesmith::{StyleObject, Template};
///
/// let accent = StyleObject::from_iter([("color", "white")]);
///
/// let styles = Template::new()
///     .text("\n  background: ")
///     .value("blue")
///     .text("\n  padding: ")
///     .value(10)
///     .text("\n  :hover {\n    ")
///     .value(accent)
///     .text("\n  }\n")
///     .parse()?;
///
/// assert_eq!(styles.to_json(), serde_json::json!({
///     "background": "blue",
///     "padding": 10,
///     ":hover": { "color": "white" }
/// }));
/// # Ok::<(), stylesmith::StyleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    fragments: Vec<String>,
    values: Vec<Value>,
}

impl Template {
    /// Creates an empty template (one empty fragment, no values).
    pub fn new() -> Self {
        Template {
            fragments: vec![String::new()],
            values: Vec::new(),
        }
    }

    /// Appends literal text to the current fragment.
    pub fn text(mut self, text: &str) -> Self {
        if let Some(last) = self.fragments.last_mut() {
            last.push_str(text);
        }
        self
    }

    /// Appends an interpolated value and starts a new fragment.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self.fragments.push(String::new());
        self
    }

    /// The literal fragments, one more than [`values`](Self::values).
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The interpolated values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Merges fragments and values into the text the parser reads.
    pub fn resolve(&self) -> Result<String> {
        resolve(&self.fragments, &self.values)
    }

    /// Resolves and parses the template.
    pub fn parse(&self) -> Result<StyleObject> {
        let text = self.resolve()?;
        StyleParser::new(&self.values).parse(&text)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StyleError;

    #[test]
    fn fragments_stay_one_ahead_of_values() {
        let t = Template::new().text("a: ").value(1).text("\nb: ").value("x");
        assert_eq!(t.fragments(), &["a: ", "\nb: ", ""]);
        assert_eq!(t.values().len(), 2);
    }

    #[test]
    fn adjacent_values_get_empty_fragment_between() {
        let t = Template::new().value(1).value(2);
        assert_eq!(t.fragments(), &["", "", ""]);
        assert_eq!(t.resolve().unwrap(), "12");
    }

    #[test]
    fn function_value_fails_before_parsing() {
        // The text alone would be unparseable; the function error wins.
        let err = Template::new()
            .text("nonsense line\nx: ")
            .value(Value::function(|| Value::Null))
            .parse()
            .unwrap_err();
        assert_eq!(err, StyleError::UnsupportedValueKind { index: 0 });
    }
}
