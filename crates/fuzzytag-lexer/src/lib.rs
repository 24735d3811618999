//! Fuzzy tag lexer for markup harvested from the open web.
//!
//! # Scope
//!
//! This crate implements:
//! - **Fuzzy lexer** ([`FuzzyLexer`])
//!   - Start, end and self-closing tags with lower-cased names
//!   - Quoted, unquoted and bare attributes
//!   - `<!-- ... -->` comments, swallowed without events
//!   - Recovery from malformed input instead of errors
//!
//! - **Entity decoding** ([`entities`])
//!   - `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and decimal `&#NN;`
//!   - Unresolvable references left in place
//!
//! - **Drivers and receivers**
//!   - [`TagReceiver`], the callback interface
//!   - [`EventCollector`], which records events
//!   - [`lex_str`] and [`lex_reader`] for whole inputs
//!
//! # Non-goals
//!
//! The lexer does not validate markup, build a tree, or resolve namespaces.
//!
//! # Example
//!
//! ```
//! use fuzzytag_lexer::{Event, EventCollector, TextMode, lex_str};
//!
//! let collector = lex_str(
//!     r#"<A HREF="X">"#,
//!     EventCollector::with_text_mode(TextMode::Skip),
//! );
//! let events = collector.into_events();
//! assert!(matches!(&events[0], Event::StartTag { name, .. } if name == "a"));
//! ```

/// Event collection for tests and tools.
pub mod collect;
/// Entity reference decoding.
pub mod entities;
/// Errors from stream drivers.
pub mod error;
/// The lexer state machine.
pub mod lexer;
/// The receiver callback interface.
pub mod receiver;
/// String and reader drivers.
pub mod source;

pub use collect::{Event, EventCollector, TextMode};
pub use entities::{decode_attribute, decode_body};
pub use error::FeedError;
pub use lexer::{FuzzyLexer, LexState};
pub use receiver::{AttributeMap, TagReceiver};
pub use source::{lex_reader, lex_str};
