//! Helper methods shared by the lexer states.
//!
//! This module contains the small steps the state handlers are built from:
//! - State transitions
//! - Buffer finalization and attribute-map bookkeeping
//! - Event emission to the receiver

use super::core::{FuzzyLexer, LexState};
use crate::entities::decode_attribute;
use crate::receiver::{AttributeMap, TagReceiver};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    pub(super) const fn switch_to(&mut self, new_state: LexState) {
        self.state = new_state;
    }

    /// Every code point at or below U+0020 is whitespace, controls included.
    pub(super) const fn is_whitespace(c: char) -> bool {
        c <= ' '
    }

    /// Forget the current tag and everything collected for it, then return
    /// to body text.
    pub(super) fn complete_tag(&mut self) {
        self.tag_name.close();
        self.attr_name.close();
        self.value.close();
        self.pending_tag.close();
        self.held_attr.close();
        self.attributes = None;
        self.switch_to(LexState::OutsideMarkup);
    }
}

// =============================================================================
// Buffer and Attribute Helpers
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    /// Turn the tag-name buffer into the pending tag name and start the
    /// attribute map for it.
    pub(super) fn finalize_tag_name(&mut self) {
        self.tag_name.finalize_into(&mut self.pending_tag);
        if self.attributes.is_none() {
            self.attributes = Some(AttributeMap::new());
        }
    }

    /// Store the held attribute name with `value` and release the name.
    ///
    /// A later attribute with the same name overwrites this one.
    pub(super) fn insert_held_attribute(&mut self, value: String) {
        if !self.held_attr.is_live() {
            return;
        }
        if let Some(attributes) = self.attributes.as_mut() {
            let _ = attributes.insert(self.held_attr.as_str().to_owned(), value);
        }
        self.held_attr.close();
    }

    /// Close an attribute that ended without `=`: finalize whatever name is
    /// in the buffer and record it with an empty value.
    pub(super) fn finalize_bare_attribute(&mut self) {
        if self.attr_name.has_text() {
            self.attr_name.finalize_into(&mut self.held_attr);
        }
        self.insert_held_attribute(String::new());
    }

    /// Decode the value buffer and store it under the held name.
    pub(super) fn commit_value(&mut self) {
        let decoded = decode_attribute(self.value.as_str()).into_owned();
        self.value.close();
        self.insert_held_attribute(decoded);
    }
}

// =============================================================================
// Event Emission Helpers
// =============================================================================

impl<R: TagReceiver> FuzzyLexer<R> {
    /// Report the pending tag and its attributes as a start tag.
    ///
    /// Does nothing when no tag name was captured, e.g. for `<>`.
    pub(super) fn emit_tag(&mut self) {
        if !self.pending_tag.is_live() {
            return;
        }
        if let Some(attributes) = self.attributes.as_ref() {
            #[cfg(feature = "lexer-trace")]
            eprintln!("[LEXER] saw tag '{}'", self.pending_tag.as_str());

            self.receiver.on_tag(self.pending_tag.as_str(), attributes);
        }
    }

    /// Report the pending tag name as an end tag.
    ///
    /// Used both for `</name>` and for the `>` of a self-closing tag.
    pub(super) fn emit_end_tag(&mut self) {
        if !self.pending_tag.is_live() {
            return;
        }

        #[cfg(feature = "lexer-trace")]
        eprintln!("[LEXER] saw end tag '{}'", self.pending_tag.as_str());

        self.receiver.on_end_tag(self.pending_tag.as_str());
    }
}
