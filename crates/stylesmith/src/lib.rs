//! Stylesmith - parse interpolated style text into nested style objects.
//!
//! Style rules are written as plain, indentation-free text with values
//! interpolated between literal fragments. The result is a [`StyleObject`]:
//! a string-keyed mapping whose values are strings, numbers, or nested
//! mappings.
//!
//! # Quick Start
//!
//! ```rust
//! use stylesmith::{style, StyleObject, Value};
//!
//! let accent = StyleObject::from_iter([
//!     ("color", "yellow"),
//!     ("text-decoration", "underline"),
//! ]);
//!
//! let styles = style(
//!     &["\n  background: blue\n  color: ", "\n\n  :hover {\n    ", "\n  }\n"],
//!     &[Value::from("red"), Value::from(accent)],
//! )?;
//!
//! assert_eq!(styles.to_json(), serde_json::json!({
//!     "background": "blue",
//!     "color": "red",
//!     ":hover": { "color": "yellow", "text-decoration": "underline" }
//! }));
//! # Ok::<(), stylesmith::StyleError>(())
//! ```
//!
//! # Pipeline
//!
//! 1. [`resolve`] merges fragments and values into one text. Primitives are
//!    written as JSON literals, objects as `###VALUE:<index>###` placeholders,
//!    and functions are rejected.
//! 2. [`StyleParser`] reads that text line by line:
//!
//! | Line | Effect |
//! |------|--------|
//! | `###VALUE:0###` | merge the object value into the current block |
//! | `color: red` | set a key in the current block |
//! | `:hover {` | open a nested block under the selector key |
//! | `}` | close the current block |
//!
//! Rule values wrapped in quotes lose one layer of quotes, values made of
//! digits with an optional decimal part become numbers, and everything else
//! is kept as text (see [`parse_atomic_value`]). One trailing `;` is ignored.
//!
//! # Errors
//!
//! All failures are [`StyleError`]s. Errors tied to a line read like
//! `Too many closing curly braces. (Style line 4)`, counting lines after a
//! single leading line break is dropped.

mod atomic;
mod error;
mod object;
mod parser;
mod resolve;
mod template;
mod tree;
mod value;

// Re-export public API
pub use atomic::parse_atomic_value;
pub use error::{Result, StyleError};
pub use object::{StyleObject, StyleValue};
pub use parser::{ParseOptions, StyleParser};
pub use resolve::{placeholder, resolve};
pub use template::Template;
pub use value::{Callable, Value};

/// Resolves `fragments` and `values`, then parses the result.
///
/// There must be exactly one more fragment than there are values.
///
/// # Errors
///
/// Resolver errors ([`StyleError::UnsupportedValueKind`],
/// [`StyleError::FragmentCountMismatch`]) carry no line number; parser errors
/// do, except [`StyleError::UnclosedBraces`].
pub fn style<S: AsRef<str>>(fragments: &[S], values: &[Value]) -> Result<StyleObject> {
    let text = resolve(fragments, values)?;
    StyleParser::new(values).parse(&text)
}

/// Parses style text that contains no interpolated values.
pub fn parse_style(text: &str) -> Result<StyleObject> {
    StyleParser::new(&[]).parse(text)
}
