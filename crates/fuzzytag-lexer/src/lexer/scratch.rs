//! Reusable text buffers, one per buffer role.

/// A growable buffer that remembers whether it is currently in use.
///
/// Closing a buffer clears its text but keeps the allocation, so a lexer
/// scanning a long document reuses the same few strings for every tag.
#[derive(Debug, Default)]
pub(super) struct Scratch {
    text: String,
    live: bool,
}

impl Scratch {
    /// Start collecting from an empty buffer.
    pub(super) fn open(&mut self) {
        self.text.clear();
        self.live = true;
    }

    /// Stop collecting and forget the contents.
    pub(super) fn close(&mut self) {
        self.text.clear();
        self.live = false;
    }

    pub(super) const fn is_live(&self) -> bool {
        self.live
    }

    /// Live and holding at least one character.
    pub(super) fn has_text(&self) -> bool {
        self.live && !self.text.is_empty()
    }

    pub(super) fn as_str(&self) -> &str {
        &self.text
    }

    pub(super) fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub(super) fn push_lowercase(&mut self, c: char) {
        self.text.extend(c.to_lowercase());
    }

    /// Hand the collected text over to `dest` and close `self`.
    ///
    /// The two strings are swapped rather than copied, so both keep their
    /// capacity for the next token.
    pub(super) fn finalize_into(&mut self, dest: &mut Self) {
        std::mem::swap(&mut self.text, &mut dest.text);
        dest.live = true;
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_moves_text() {
        let mut buffer = Scratch::default();
        let mut dest = Scratch::default();
        buffer.open();
        buffer.push_lowercase('D');
        buffer.push('I');
        buffer.finalize_into(&mut dest);

        assert!(!buffer.is_live());
        assert!(buffer.as_str().is_empty());
        assert!(dest.is_live());
        assert_eq!(dest.as_str(), "dI");
    }

    #[test]
    fn test_open_buffer_without_text() {
        let mut buffer = Scratch::default();
        assert!(!buffer.has_text());
        buffer.open();
        assert!(buffer.is_live());
        assert!(!buffer.has_text());
        buffer.push('x');
        assert!(buffer.has_text());
        buffer.close();
        assert!(!buffer.has_text());
    }
}
