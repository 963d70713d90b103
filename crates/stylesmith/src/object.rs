//! The nested style mapping produced by parsing.
//!
//! A [`StyleObject`] maps string keys to [`StyleValue`]s, which are either
//! scalars (strings, numbers) or nested style objects introduced by selector
//! blocks such as `:hover { ... }`.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A single entry value in a [`StyleObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Text value, e.g. `blue` or `20px`.
    String(String),
    /// Numeric value, e.g. `10` or `0.5`.
    Number(f64),
    /// Nested style object under a selector key.
    Object(StyleObject),
}

impl StyleValue {
    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the nested object, if present.
    pub fn as_object(&self) -> Option<&StyleObject> {
        match self {
            StyleValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Converts this value into JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            StyleValue::String(s) => serde_json::Value::String(s.clone()),
            StyleValue::Number(n) => json_number(*n),
            StyleValue::Object(o) => o.to_json(),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::String(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::String(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<StyleObject> for StyleValue {
    fn from(o: StyleObject) -> Self {
        StyleValue::Object(o)
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::String(s) => serializer.serialize_str(s),
            StyleValue::Number(n) => json_number(*n).serialize(serializer),
            StyleValue::Object(o) => o.serialize(serializer),
        }
    }
}

/// Converts a number to JSON the way a JSON literal would print it.
///
/// Integral finite numbers become JSON integers (`20`, not `20.0`);
/// non-finite numbers become `null`.
fn json_number(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// A string-keyed, insertion-ordered style mapping.
///
/// Equality ignores key order.
///
/// # Example
///
/// ```
/// use stylesmith::{StyleObject, StyleValue};
///
/// let mut hover = StyleObject::new();
/// hover.insert("color", "white");
///
/// let mut styles = StyleObject::new();
/// styles.insert("padding", 10);
/// styles.insert(":hover", hover);
///
/// assert_eq!(styles.get("padding").and_then(StyleValue::as_number), Some(10.0));
/// assert_eq!(styles.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleObject {
    entries: IndexMap<String, StyleValue>,
}

impl StyleObject {
    /// Creates an empty style object.
    pub fn new() -> Self {
        StyleObject::default()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key` to `value`, returning the value it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.entries.shift_remove(key)
    }

    /// Copies every entry of `other` into `self`, overwriting on conflict.
    ///
    /// The merge is shallow: a nested object in `other` replaces the value
    /// under the same key rather than being merged into it.
    pub fn merge(&mut self, other: &StyleObject) {
        for (key, value) in other.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, StyleValue> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, StyleValue> {
        self.entries.keys()
    }

    /// Converts the whole tree into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StyleObject {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for StyleObject {
    type Item = (String, StyleValue);
    type IntoIter = indexmap::map::IntoIter<String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a StyleObject {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = indexmap::map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_is_shallow_and_overwrites() {
        let mut target: StyleObject = [("color", "red"), ("margin", "0")]
            .into_iter()
            .collect();
        let mut nested = StyleObject::new();
        nested.insert("x", 1);
        let mut other = StyleObject::new();
        other.insert("color", "yellow");
        other.insert(":hover", nested.clone());

        target.merge(&other);

        assert_eq!(target.get("color"), Some(&StyleValue::from("yellow")));
        assert_eq!(target.get("margin"), Some(&StyleValue::from("0")));
        assert_eq!(target.get(":hover"), Some(&StyleValue::Object(nested)));
        let keys: Vec<_> = target.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["color", "margin", ":hover"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: StyleObject = [("a", 1), ("b", 2)].into_iter().collect();
        let b: StyleObject = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_integral_numbers_as_integers() {
        let mut nested = StyleObject::new();
        nested.insert("opacity", 0.5);
        let mut styles = StyleObject::new();
        styles.insert("padding", 10);
        styles.insert("color", "red");
        styles.insert("@media print", nested);

        let expected = json!({
            "padding": 10,
            "color": "red",
            "@media print": { "opacity": 0.5 }
        });
        assert_eq!(serde_json::to_value(&styles).unwrap(), expected);
        assert_eq!(styles.to_json(), expected);
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(json_number(f64::NAN), serde_json::Value::Null);
        assert_eq!(json_number(f64::INFINITY), serde_json::Value::Null);
    }

    #[test]
    fn remove_keeps_order() {
        let mut styles: StyleObject = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(styles.remove("b"), Some(StyleValue::Number(2.0)));
        let keys: Vec<_> = styles.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
