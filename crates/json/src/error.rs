//! Error types for parsing and serialization.

use thiserror::Error;

/// Errors produced while parsing JSON text.
///
/// Every variant carries the byte offset of the failure in the input. A
/// parse aborts on the first error with no partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A bare keyword span that is not exactly `true`, `false` or `null`.
    #[error("malformed literal at offset {offset}")]
    MalformedLiteral { offset: usize },
    /// `\` followed by a character outside the escape set, or a broken
    /// `\uXXXX` unit or surrogate pair.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },
    /// End of input before a string literal's closing quote.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
    /// A number span with broken digit structure, or one that overflows the
    /// target numeric type.
    #[error("invalid number literal at offset {offset}")]
    InvalidNumber { offset: usize },
    /// Input ended where a token was still required.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },
    /// Non-whitespace input remains after the outermost value.
    #[error("trailing characters after the top-level value at offset {offset}")]
    TrailingContent { offset: usize },
    /// A valid token in a position where a different token was required,
    /// e.g. the missing `:` in `{"id" 5}`.
    #[error("expected {expected} at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset of the failure in the input text.
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::MalformedLiteral { offset }
            | ParseError::InvalidEscape { offset }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidNumber { offset }
            | ParseError::UnexpectedEndOfInput { offset }
            | ParseError::TrailingContent { offset }
            | ParseError::UnexpectedToken { offset, .. } => offset,
        }
    }
}

/// Errors produced while serializing a value.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The value has no JSON rendering; the message names the shape.
    #[error("cannot serialize {0} as JSON")]
    UnsupportedType(&'static str),
    /// Propagated unchanged from the caller's sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
