use std::ops::ControlFlow;

use fuzzytag_common::warning::warn_once;
use strum_macros::Display;

use super::scratch::Scratch;
use crate::receiver::{AttributeMap, TagReceiver};

/// Position of the lexer inside the tag/comment/attribute grammar.
///
/// The lexer starts in [`LexState::OutsideMarkup`] and returns there after
/// every completed tag or comment. No state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum LexState {
    /// Body text. Only `<` is significant.
    #[default]
    #[strum(to_string = "body text")]
    OutsideMarkup,
    /// Just saw `<`.
    #[strum(to_string = "an open angle bracket")]
    SawOpenAngle,
    /// Saw `<!`.
    #[strum(to_string = "a markup declaration")]
    SawBang,
    /// Saw `<!-`.
    #[strum(to_string = "a comment opener")]
    SawDash,
    /// Inside `<!-- ... `.
    #[strum(to_string = "a comment")]
    InComment,
    /// Inside a comment, after one `-`.
    #[strum(to_string = "a comment")]
    SawCommentDash,
    /// Inside a comment, after a run of two or more `-`.
    #[strum(to_string = "a comment")]
    SawSecondCommentDash,
    /// Collecting a start tag name.
    #[strum(to_string = "a tag name")]
    TagName,
    /// Collecting an attribute name.
    #[strum(to_string = "an attribute name")]
    AttrName,
    /// Holding a finished attribute name, waiting to see whether `=` follows.
    #[strum(to_string = "an attribute")]
    AttrLookingForValue,
    /// After `=`, waiting to learn the quoting style.
    #[strum(to_string = "an attribute value")]
    AttrValue,
    /// Inside `'...'`.
    #[strum(to_string = "a single-quoted attribute value")]
    SingleQuotedValue,
    /// Inside `"..."`.
    #[strum(to_string = "a double-quoted attribute value")]
    DoubleQuotedValue,
    /// Inside a value with no quotes.
    #[strum(to_string = "an unquoted attribute value")]
    UnquotedValue,
    /// Saw the `/` of a self-closing tag, waiting for `>`.
    #[strum(to_string = "a self-closing tag")]
    TagSawSlash,
    /// Collecting the name of `</name>`.
    #[strum(to_string = "an end tag")]
    EndTagName,
}

/// Single-pass, character-driven lexer for permissive HTML-like markup.
///
/// Characters go in one at a time through [`FuzzyLexer::consume`]; start
/// tags, end tags and body text come out through the [`TagReceiver`]. The
/// lexer never looks ahead and never fails: malformed markup is absorbed
/// and the machine resynchronizes at the next recognizable construct.
///
/// Two behaviours that look like bugs are deliberate:
/// - a self-closing tag such as `<br/>` reports a start tag at the `/` and
///   an end tag at the `>`;
/// - any character at or below U+0020, control characters included, counts
///   as whitespace.
///
/// One lexer scans one character stream. Give each document its own lexer.
#[derive(Debug)]
pub struct FuzzyLexer<R> {
    pub(super) state: LexState,
    pub(super) receiver: R,
    pub(super) tag_name: Scratch,
    pub(super) attr_name: Scratch,
    pub(super) value: Scratch,
    /// Finalized tag name, held until the tag completes.
    pub(super) pending_tag: Scratch,
    /// Finalized attribute name not yet in the map.
    pub(super) held_attr: Scratch,
    /// Present from tag-name completion until the tag completes.
    pub(super) attributes: Option<AttributeMap>,
}

impl<R: TagReceiver> FuzzyLexer<R> {
    /// Create a lexer in the outside-markup state that reports to `receiver`.
    #[must_use]
    pub fn new(receiver: R) -> Self {
        Self {
            state: LexState::OutsideMarkup,
            receiver,
            tag_name: Scratch::default(),
            attr_name: Scratch::default(),
            value: Scratch::default(),
            pending_tag: Scratch::default(),
            held_attr: Scratch::default(),
            attributes: None,
        }
    }

    /// Feed one character.
    ///
    /// Causes at most one state transition and at most one receiver
    /// callback. Always returns [`ControlFlow::Continue`]; the break signal
    /// is reserved for drivers layered on top of the lexer.
    pub fn consume(&mut self, c: char) -> ControlFlow<()> {
        match self.state {
            LexState::OutsideMarkup => self.handle_outside_markup(c),
            LexState::SawOpenAngle => self.handle_saw_open_angle(c),
            LexState::SawBang => self.handle_saw_bang(c),
            LexState::SawDash => self.handle_saw_dash(c),
            LexState::InComment => self.handle_in_comment(c),
            LexState::SawCommentDash => self.handle_saw_comment_dash(c),
            LexState::SawSecondCommentDash => self.handle_saw_second_comment_dash(c),
            LexState::TagName => self.handle_tag_name(c),
            LexState::AttrName => self.handle_attr_name(c),
            LexState::AttrLookingForValue => self.handle_attr_looking_for_value(c),
            LexState::AttrValue => self.handle_attr_value(c),
            LexState::SingleQuotedValue => self.handle_quoted_value(c, '\''),
            LexState::DoubleQuotedValue => self.handle_quoted_value(c, '"'),
            LexState::UnquotedValue => self.handle_unquoted_value(c),
            LexState::TagSawSlash => self.handle_tag_saw_slash(c),
            LexState::EndTagName => self.handle_end_tag_name(c),
        }
        ControlFlow::Continue(())
    }

    /// Signal end of stream.
    ///
    /// Anything still being scanned is dropped without an event. Ending
    /// inside a tag or comment is reported once through the warning
    /// system; the state is left as-is so callers can inspect it.
    pub fn finish(&mut self) {
        if !self.is_idle() {
            warn_once("Lexer", &format!("input ended inside {}", self.state));
        }
        self.receiver.on_finish();
    }

    /// Current lexical state.
    #[must_use]
    pub const fn state(&self) -> LexState {
        self.state
    }

    /// Whether the lexer sits between structures, in body text.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == LexState::OutsideMarkup
    }

    /// The receiver events are delivered to.
    #[must_use]
    pub const fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Mutable access to the receiver, e.g. to drain collected events.
    pub const fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Consume the lexer and return its receiver.
    #[must_use]
    pub fn into_receiver(self) -> R {
        self.receiver
    }

    /// Drop any partially scanned structure and return to body text.
    ///
    /// Buffers keep their allocations, so a lexer can be reset and reused
    /// for the next document.
    pub fn reset(&mut self) {
        self.complete_tag();
    }
}

// =============================================================================
// Comment and Markup-Opening States
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    fn handle_outside_markup(&mut self, c: char) {
        if c == '<' {
            self.switch_to(LexState::SawOpenAngle);
        } else {
            self.receiver.on_text(c);
        }
    }

    fn handle_saw_open_angle(&mut self, c: char) {
        match c {
            '!' => self.switch_to(LexState::SawBang),
            '/' => {
                self.tag_name.open();
                self.switch_to(LexState::EndTagName);
            }
            _ => {
                self.tag_name.open();
                if !Self::is_whitespace(c) {
                    self.tag_name.push_lowercase(c);
                }
                self.switch_to(LexState::TagName);
            }
        }
    }

    // `<!x` that does not open a comment is dropped silently.
    fn handle_saw_bang(&mut self, c: char) {
        if c == '-' {
            self.switch_to(LexState::SawDash);
        } else {
            self.switch_to(LexState::OutsideMarkup);
        }
    }

    fn handle_saw_dash(&mut self, c: char) {
        if c == '-' {
            self.switch_to(LexState::InComment);
        } else {
            self.switch_to(LexState::OutsideMarkup);
        }
    }

    fn handle_in_comment(&mut self, c: char) {
        if c == '-' {
            self.switch_to(LexState::SawCommentDash);
        }
    }

    fn handle_saw_comment_dash(&mut self, c: char) {
        if c == '-' {
            self.switch_to(LexState::SawSecondCommentDash);
        } else {
            self.switch_to(LexState::InComment);
        }
    }

    fn handle_saw_second_comment_dash(&mut self, c: char) {
        match c {
            '>' => self.switch_to(LexState::OutsideMarkup),
            // Absorb dash runs so `--->` still closes.
            '-' => {}
            _ => self.switch_to(LexState::InComment),
        }
    }
}

// =============================================================================
// Tag Name States
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    fn handle_tag_name(&mut self, c: char) {
        if Self::is_whitespace(c) {
            if self.tag_name.has_text() {
                self.finalize_tag_name();
                self.attr_name.open();
                self.switch_to(LexState::AttrName);
            }
        } else if c == '/' {
            if self.tag_name.has_text() {
                self.finalize_tag_name();
                self.emit_tag();
                self.switch_to(LexState::TagSawSlash);
            } else {
                // `< /` names nothing; abandon it.
                self.complete_tag();
            }
        } else if c == '>' {
            if self.tag_name.has_text() {
                self.finalize_tag_name();
            }
            self.emit_tag();
            self.complete_tag();
        } else {
            self.tag_name.push_lowercase(c);
        }
    }

    fn handle_tag_saw_slash(&mut self, c: char) {
        if c == '>' {
            self.emit_end_tag();
            self.complete_tag();
        }
    }

    fn handle_end_tag_name(&mut self, c: char) {
        if Self::is_whitespace(c) {
            // The name is done, but `>` has not been seen yet.
            if self.tag_name.has_text() {
                self.tag_name.finalize_into(&mut self.pending_tag);
            }
        } else if c == '>' {
            if self.tag_name.has_text() {
                self.tag_name.finalize_into(&mut self.pending_tag);
            }
            self.emit_end_tag();
            self.complete_tag();
        } else if self.tag_name.is_live() {
            self.tag_name.push_lowercase(c);
        }
    }
}

// =============================================================================
// Attribute States
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    fn handle_attr_name(&mut self, c: char) {
        if Self::is_whitespace(c) {
            if self.attr_name.has_text() {
                self.attr_name.finalize_into(&mut self.held_attr);
                self.switch_to(LexState::AttrLookingForValue);
            }
        } else if c == '=' {
            // A stray `=` with no name in front of it is dropped.
            if self.attr_name.has_text() {
                self.attr_name.finalize_into(&mut self.held_attr);
                self.value.open();
                self.switch_to(LexState::AttrValue);
            }
        } else if c == '/' {
            self.finalize_bare_attribute();
            self.emit_tag();
            self.switch_to(LexState::TagSawSlash);
        } else if c == '>' {
            self.finalize_bare_attribute();
            self.emit_tag();
            self.complete_tag();
        } else {
            self.attr_name.push_lowercase(c);
        }
    }

    fn handle_attr_looking_for_value(&mut self, c: char) {
        if c == '=' {
            self.value.open();
            self.switch_to(LexState::AttrValue);
        } else if c == '>' {
            self.insert_held_attribute(String::new());
            self.emit_tag();
            self.complete_tag();
        } else if c == '/' {
            self.insert_held_attribute(String::new());
            self.emit_tag();
            self.switch_to(LexState::TagSawSlash);
        } else if !Self::is_whitespace(c) {
            // The held name was a bare attribute such as `disabled`; this
            // character starts the next one.
            self.insert_held_attribute(String::new());
            self.attr_name.open();
            self.attr_name.push_lowercase(c);
            self.switch_to(LexState::AttrName);
        }
    }

    fn handle_attr_value(&mut self, c: char) {
        match c {
            '\'' => self.switch_to(LexState::SingleQuotedValue),
            '"' => self.switch_to(LexState::DoubleQuotedValue),
            _ if Self::is_whitespace(c) => {}
            _ => {
                self.value.push(c);
                self.switch_to(LexState::UnquotedValue);
            }
        }
    }

    /// A line break ends a quoted value early, so one missing quote cannot
    /// swallow the rest of the document.
    fn handle_quoted_value(&mut self, c: char, quote: char) {
        if c == quote || c == '\n' || c == '\r' {
            self.commit_value();
            self.attr_name.open();
            self.switch_to(LexState::AttrName);
        } else {
            self.value.push(c);
        }
    }

    fn handle_unquoted_value(&mut self, c: char) {
        if Self::is_whitespace(c) {
            self.commit_value();
            self.attr_name.open();
            self.switch_to(LexState::AttrName);
        } else if c == '/' {
            self.commit_value();
            self.emit_tag();
            self.switch_to(LexState::TagSawSlash);
        } else if c == '>' {
            self.commit_value();
            self.emit_tag();
            self.complete_tag();
        } else {
            self.value.push(c);
        }
    }
}
