//! Parse error types for rule text.

use thiserror::Error;

/// An error that occurred while parsing rule text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The rule text was empty.
    #[error("empty rule text")]
    Empty,

    /// Nothing followed the flag prefix.
    #[error("missing function path at column {column}")]
    MissingPath { column: usize },
}
