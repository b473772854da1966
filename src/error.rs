//! Error types for seed input and configuration parsing.
//!
//! Stepping and seeding an engine cannot fail; only text that comes from
//! outside the process can.

use thiserror::Error;

/// Errors raised while reading a seed pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to read pattern: {0}")]
    Io(#[from] std::io::Error),

    /// RLE body encountered before the `x = W, y = H` header.
    #[error("line {line}: pattern body before `x = .., y = ..` header")]
    MissingHeader { line: usize },

    #[error("line {line}: malformed RLE header")]
    InvalidHeader { line: usize },

    /// A run count that does not fit the coordinate space.
    #[error("invalid run count in token `{token}`")]
    InvalidCount { token: String },
}

/// An engine name that matches no known engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine `{0}` (expected `weighted` or `block`)")]
pub struct ParseEngineError(pub String);
