//! Entity reference decoding for attribute values.
//!
//! Only the five XML entities and decimal references (`&#65;`) are known.
//! Anything that fails to resolve is left in place: the `&` is emitted
//! literally and scanning resumes at the very next character, so the rest of
//! the would-be reference comes through as ordinary text.

use std::borrow::Cow;

/// The named references this decoder resolves, without `&` and `;`.
///
/// Names are matched case-sensitively.
static ENTITY_TABLE: [(&str, char); 5] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
];

/// Look up a named reference such as `amp`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<char> {
    ENTITY_TABLE
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|&(_, c)| c)
}

/// Resolve the text between `&` and `;`.
///
/// `#` followed by a base-10 integer yields the character with that code
/// point. Integers that are not Unicode scalar values (negative numbers,
/// surrogates, values past U+10FFFF) yield U+FFFD instead of failing.
#[must_use]
pub fn resolve_reference(chunk: &str) -> Option<char> {
    match chunk.strip_prefix('#') {
        Some(digits) => digits.parse::<i32>().ok().map(code_point_to_char),
        None => lookup_entity(chunk),
    }
}

fn code_point_to_char(value: i32) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Decode entity references in a raw attribute value.
///
/// Returns the input unchanged (and unallocated) when it contains no `&`.
#[must_use]
pub fn decode_attribute(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];

        let resolved = if c == '&' {
            rest.find(';').and_then(|end| {
                resolve_reference(&rest[..end]).map(|replacement| (replacement, end))
            })
        } else {
            None
        };

        match resolved {
            Some((replacement, end)) => {
                output.push(replacement);
                rest = &rest[end + 1..];
            }
            None => output.push(c),
        }
    }
    Cow::Owned(output)
}

/// Decode entity references in a run of body text.
///
/// The lexer itself never decodes body text; this is for receivers that
/// collect text and want it decoded with the same rules as attributes.
#[must_use]
pub fn decode_body(text: &str) -> Cow<'_, str> {
    decode_attribute(text)
}
