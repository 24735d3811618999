//! Common utilities for the fuzzytag lexer.
//!
//! This crate provides shared infrastructure used by the lexer and its tools:
//! - **Warning System** - colored, deduplicated terminal diagnostics

pub mod warning;
