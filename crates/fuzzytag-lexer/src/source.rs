//! Drivers that push whole strings or byte streams through a lexer.
//!
//! Byte streams are decoded incrementally: a multi-byte UTF-8 sequence split
//! across two reads is carried over, and invalid sequences become U+FFFD so
//! decoding always makes progress. Nothing beyond one read chunk is ever
//! buffered.

use std::io::{ErrorKind, Read};
use std::mem;
use std::ops::ControlFlow;

use crate::error::FeedError;
use crate::lexer::FuzzyLexer;
use crate::receiver::TagReceiver;

/// Bytes requested from the reader per call.
const READ_CHUNK: usize = 8 * 1024;

impl<R: TagReceiver> FuzzyLexer<R> {
    /// Feed every character of `input`, stopping early if the lexer asks to.
    pub fn feed(&mut self, input: &str) -> ControlFlow<()> {
        for c in input.chars() {
            self.consume(c)?;
        }
        ControlFlow::Continue(())
    }

    /// Feed the UTF-8 bytes produced by `reader` until it is exhausted.
    ///
    /// Does not call [`FuzzyLexer::finish`]; the caller decides when the
    /// stream is over.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Io`] if the reader fails. Interrupted reads are
    /// retried.
    pub fn feed_reader<T: Read>(&mut self, mut reader: T) -> Result<ControlFlow<()>, FeedError> {
        let mut decoder = Utf8Decoder::default();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FeedError::from(err)),
            };
            if decoder
                .push(&chunk[..read], &mut |c| self.consume(c))
                .is_break()
            {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(decoder.finish(&mut |c| self.consume(c)))
    }
}

/// Lex all of `input` into `receiver`, finish, and hand the receiver back.
pub fn lex_str<R: TagReceiver>(input: &str, receiver: R) -> R {
    let mut lexer = FuzzyLexer::new(receiver);
    let _ = lexer.feed(input);
    lexer.finish();
    lexer.into_receiver()
}

/// Lex everything `reader` produces into `receiver`, finish, and hand the
/// receiver back.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the reader fails.
pub fn lex_reader<T: Read, R: TagReceiver>(reader: T, receiver: R) -> Result<R, FeedError> {
    let mut lexer = FuzzyLexer::new(receiver);
    let _ = lexer.feed_reader(reader)?;
    lexer.finish();
    Ok(lexer.into_receiver())
}

/// Incremental, lossy UTF-8 decoder.
#[derive(Debug, Default)]
struct Utf8Decoder {
    /// Incomplete sequence left at the end of the previous chunk.
    carry: Vec<u8>,
}

impl Utf8Decoder {
    fn push<F>(&mut self, bytes: &[u8], sink: &mut F) -> ControlFlow<()>
    where
        F: FnMut(char) -> ControlFlow<()>,
    {
        if self.carry.is_empty() {
            return self.decode(bytes, sink);
        }
        // The carry is at most three bytes; joining copies one chunk.
        let mut joined = mem::take(&mut self.carry);
        joined.extend_from_slice(bytes);
        self.decode(&joined, sink)
    }

    fn decode<F>(&mut self, mut bytes: &[u8], sink: &mut F) -> ControlFlow<()>
    where
        F: FnMut(char) -> ControlFlow<()>,
    {
        while !bytes.is_empty() {
            match std::str::from_utf8(bytes) {
                Ok(text) => return emit(text, sink),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    emit(&String::from_utf8_lossy(valid), sink)?;
                    match err.error_len() {
                        Some(len) => {
                            sink(char::REPLACEMENT_CHARACTER)?;
                            bytes = &rest[len..];
                        }
                        None => {
                            self.carry.extend_from_slice(rest);
                            break;
                        }
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Flush a dangling incomplete sequence as U+FFFD.
    fn finish<F>(&mut self, sink: &mut F) -> ControlFlow<()>
    where
        F: FnMut(char) -> ControlFlow<()>,
    {
        let carry = mem::take(&mut self.carry);
        emit(&String::from_utf8_lossy(&carry), sink)
    }
}

fn emit<F>(text: &str, sink: &mut F) -> ControlFlow<()>
where
    F: FnMut(char) -> ControlFlow<()>,
{
    for c in text.chars() {
        sink(c)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_chunks(chunks: &[&[u8]]) -> String {
        let mut decoder = Utf8Decoder::default();
        let mut text = String::new();
        let mut sink = |c: char| {
            text.push(c);
            ControlFlow::Continue(())
        };
        for chunk in chunks {
            assert!(decoder.push(chunk, &mut sink).is_continue());
        }
        assert!(decoder.finish(&mut sink).is_continue());
        text
    }

    #[test]
    fn test_split_multibyte_across_chunks() {
        let bytes = "é€😀".as_bytes();
        assert_eq!(decode_chunks(&[&bytes[..1], &bytes[1..4], &bytes[4..]]), "é€😀");
    }

    #[test]
    fn test_invalid_bytes_become_replacement() {
        assert_eq!(decode_chunks(&[b"a\xFFb".as_slice()]), "a\u{FFFD}b");
    }

    #[test]
    fn test_truncated_sequence_at_end() {
        assert_eq!(decode_chunks(&[b"ab\xE2\x82".as_slice()]), "ab\u{FFFD}");
    }

    #[test]
    fn test_break_stops_decoding() {
        let mut decoder = Utf8Decoder::default();
        let mut seen = String::new();
        let mut sink = |c: char| {
            seen.push(c);
            if c == 'b' {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        assert!(decoder.push(b"abc", &mut sink).is_break());
        assert_eq!(seen, "ab");
    }
}
