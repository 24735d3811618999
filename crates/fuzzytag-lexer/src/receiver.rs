//! The consumer side of the lexer.

use std::collections::HashMap;

/// Attributes of one start tag, keyed by lower-cased name.
///
/// Values are entity-decoded and keep their original case. When a tag
/// repeats an attribute the last occurrence wins.
pub type AttributeMap = HashMap<String, String>;

/// Receives the structural events a [`FuzzyLexer`](crate::FuzzyLexer)
/// recognizes.
///
/// Every method defaults to a no-op, so a receiver only overrides what it
/// cares about. Callbacks run synchronously inside `consume` and `finish`;
/// a receiver that blocks stalls the lexer with it.
pub trait TagReceiver {
    /// A start tag was recognized.
    ///
    /// Self-closing tags (`<br/>`) land here when the `/` is seen and are
    /// followed by [`TagReceiver::on_end_tag`] for the same name at the `>`.
    fn on_tag(&mut self, _name: &str, _attributes: &AttributeMap) {}

    /// An end tag `</name>` was recognized, or a self-closing tag finished.
    fn on_end_tag(&mut self, _name: &str) {}

    /// One character of body text outside any tag or comment.
    fn on_text(&mut self, _c: char) {}

    /// The character stream ended.
    fn on_finish(&mut self) {}
}

/// Discards every event.
impl TagReceiver for () {}

impl<T: TagReceiver + ?Sized> TagReceiver for &mut T {
    fn on_tag(&mut self, name: &str, attributes: &AttributeMap) {
        (**self).on_tag(name, attributes);
    }

    fn on_end_tag(&mut self, name: &str) {
        (**self).on_end_tag(name);
    }

    fn on_text(&mut self, c: char) {
        (**self).on_text(c);
    }

    fn on_finish(&mut self) {
        (**self).on_finish();
    }
}
