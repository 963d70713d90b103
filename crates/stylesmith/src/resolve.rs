//! Merging literal fragments and interpolated values into one text.

use crate::error::{Result, StyleError};
use crate::value::Value;

/// Builds the placeholder token standing in for the object value at `index`.
pub fn placeholder(index: usize) -> String {
    format!("###VALUE:{}###", index)
}

/// Interleaves `fragments` with the rendering of each value.
///
/// After fragment `i`, the value at index `i` (if any) is appended:
/// objects as a [`placeholder`] token, primitives as their JSON literal.
/// Function values are rejected before anything is parsed.
///
/// # Errors
///
/// - [`StyleError::FragmentCountMismatch`] unless there is exactly one more
///   fragment than there are values.
/// - [`StyleError::UnsupportedValueKind`] for the first function value.
///
/// # Example
///
/// ```
/// use stylesmith::{resolve, StyleObject, Value};
///
/// let mixin = StyleObject::from_iter([("color", "red")]);
/// let text = resolve(
///     &["\n  width: ", "\n  ", "\n"],
///     &[Value::from(10), Value::from(mixin)],
/// )?;
/// assert_eq!(text, "\n  width: 10\n  ###VALUE:1###\n");
/// # Ok::<(), stylesmith::StyleError>(())
/// ```
pub fn resolve<S: AsRef<str>>(fragments: &[S], values: &[Value]) -> Result<String> {
    if fragments.len() != values.len() + 1 {
        return Err(StyleError::FragmentCountMismatch {
            expected: values.len() + 1,
            values: values.len(),
            fragments: fragments.len(),
        });
    }

    let capacity = fragments.iter().map(|f| f.as_ref().len()).sum();
    let mut resolved = String::with_capacity(capacity);
    for (index, fragment) in fragments.iter().enumerate() {
        resolved.push_str(fragment.as_ref());

        let Some(value) = values.get(index) else {
            continue;
        };
        match value {
            Value::Function(_) => {
                tracing::debug!(target: "stylesmith::resolve", index, "rejected function value");
                return Err(StyleError::UnsupportedValueKind { index });
            }
            Value::Object(_) => resolved.push_str(&placeholder(index)),
            primitive => {
                if let Some(literal) = primitive.render() {
                    resolved.push_str(&literal);
                }
            }
        }
    }

    tracing::trace!(
        target: "stylesmith::resolve",
        fragments = fragments.len(),
        len = resolved.len(),
        "resolved style text"
    );
    Ok(resolved)
}
