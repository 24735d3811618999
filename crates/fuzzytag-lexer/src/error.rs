//! Errors raised while driving the lexer from an external source.
//!
//! Malformed markup and malformed UTF-8 are never errors; only the byte
//! source itself can fail.

use thiserror::Error;

/// Failure while feeding the lexer from a reader.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The underlying reader returned an error.
    #[error("failed to read markup source: {0}")]
    Io(#[from] std::io::Error),
}
