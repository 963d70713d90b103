//! Interpolated value types.
//!
//! A [`Value`] is one entry of the value sequence that is interleaved with the
//! literal text fragments. Primitives are rendered into the text as JSON
//! literals; objects are merged into the style tree; functions are rejected.

use std::fmt;
use std::sync::Arc;

use crate::object::{StyleObject, StyleValue};

/// A value interpolated between two literal text fragments.
///
/// # Example
///
/// ```
/// use stylesmith::{StyleObject, Value};
///
/// let color: Value = "red".into();
/// assert_eq!(color.render().as_deref(), Some("\"red\""));
///
/// let padding: Value = 10.into();
/// assert_eq!(padding.render().as_deref(), Some("10"));
///
/// let mixin: Value = StyleObject::from_iter([("color", "white")]).into();
/// assert!(mixin.is_object());
/// assert_eq!(mixin.render(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null, rendered as `null`.
    Null,
    /// Boolean, rendered as `true` or `false`.
    Bool(bool),
    /// Number, rendered in JSON numeric form.
    Number(f64),
    /// String, rendered double-quoted with JSON escaping.
    String(String),
    /// A style object merged into the enclosing block.
    Object(StyleObject),
    /// A callable. Never accepted by the resolver.
    Function(Callable),
}

impl Value {
    /// Wraps a closure as a function-typed value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Function(Callable::new(f))
    }

    /// Returns the name of this value's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Returns `true` for null, booleans, numbers and strings.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Function(_))
    }

    /// Returns `true` if this is an `Object` value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if this is a `Function` value.
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Extracts the style object, if present.
    pub fn as_object(&self) -> Option<&StyleObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Renders a primitive as its canonical JSON literal.
    ///
    /// Numbers use plain decimal digits for magnitudes in `[1e-6, 1e21)` and
    /// exponent form outside it, so every number in that range parses back
    /// as the same number.
    ///
    /// Returns `None` for objects and functions, which have no literal form.
    pub fn render(&self) -> Option<String> {
        let json = match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => return Some(number_literal(*n)),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Object(_) | Value::Function(_) => return None,
        };
        Some(json.to_string())
    }
}

/// Formats a number with the shortest round-trip digits, switching to
/// exponent form only below `1e-6` or from `1e21` up. Non-finite numbers
/// become `null`.
fn number_literal(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_literal(-n));
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.25e-7`.
    let scientific = format!("{:e}", n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    let k = digits.len() as i32;
    // Decimal point position: value = 0.<digits> * 10^point.
    let point = exponent + 1;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

/// A shared closure standing in for a function-typed value.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn() -> Value + Send + Sync>);

impl Callable {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    /// Invokes the closure.
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// Conversions from common types to Value

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<StyleObject> for Value {
    fn from(o: StyleObject) -> Self {
        Value::Object(o)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Function(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Object(json_to_object(other)),
        }
    }
}

/// Builds a style object from a JSON object or array.
///
/// Array elements are keyed by their index. Booleans and nulls nested inside
/// have no style value form and are kept as their literal text.
fn json_to_object(json: serde_json::Value) -> StyleObject {
    match json {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, json_to_style_value(v)))
            .collect(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), json_to_style_value(v)))
            .collect(),
        _ => StyleObject::new(),
    }
}

fn json_to_style_value(json: serde_json::Value) -> StyleValue {
    match json {
        serde_json::Value::String(s) => StyleValue::String(s),
        serde_json::Value::Number(n) => StyleValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::Bool(b) => StyleValue::String(b.to_string()),
        serde_json::Value::Null => StyleValue::String("null".to_string()),
        nested => StyleValue::Object(json_to_object(nested)),
    }
}
