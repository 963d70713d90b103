//! Error types for the stylesmith crate.

use thiserror::Error;

/// Errors that can occur while resolving or parsing style text.
///
/// Every failure is terminal: parsing stops at the first error and no partial
/// [`StyleObject`](crate::StyleObject) is returned. Errors raised while a line
/// is processed are wrapped once in [`StyleError::AtLine`], which appends the
/// 1-based line number to the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A function-typed value was interpolated.
    #[error("Functions are not supported (value #{index}).")]
    UnsupportedValueKind { index: usize },

    /// The number of literal fragments is not the number of values plus one.
    #[error("Expected {expected} literal fragments for {values} values, got {fragments}.")]
    FragmentCountMismatch {
        expected: usize,
        values: usize,
        fragments: usize,
    },

    /// A placeholder token shares its line with other content.
    #[error("No other statements than the object expression allowed on one line.")]
    MultipleStatementsOnLine,

    /// A placeholder token does not point at an interpolated object value.
    #[error("No object value for placeholder \"{placeholder}\".")]
    MissingObjectValue { placeholder: String },

    /// A `}` line with no open block to close.
    #[error("Too many closing curly braces.")]
    UnbalancedBraces,

    /// A line matching none of the known forms.
    #[error("Cannot parse line: \"{line}\"")]
    UnparseableLine { line: String },

    /// End of input reached with blocks still open.
    #[error("Expected closing curly braces.")]
    UnclosedBraces,

    /// An error raised while processing a specific line.
    #[error("{source} (Style line {line})")]
    AtLine {
        /// 1-based line number, counted after the leading line break is stripped.
        line: usize,
        #[source]
        source: Box<StyleError>,
    },
}

impl StyleError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        StyleError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Returns the line number attached to this error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            StyleError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the underlying error with any line annotation removed.
    pub fn root_cause(&self) -> &StyleError {
        match self {
            StyleError::AtLine { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for stylesmith operations.
pub type Result<T> = std::result::Result<T, StyleError>;
