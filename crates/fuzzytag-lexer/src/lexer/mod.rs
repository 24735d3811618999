//! The fuzzy tag lexer state machine.

/// Lexer states and the per-state transition logic.
pub mod core;
/// Helper methods for transitions, buffers and event emission.
mod helpers;
/// Reusable per-role text buffers.
mod scratch;

pub use self::core::{FuzzyLexer, LexState};
