//! A receiver that records lexer events for later inspection.

use std::collections::BTreeMap;
use std::mem;

use serde::Serialize;

use crate::entities::decode_body;
use crate::receiver::{AttributeMap, TagReceiver};

/// One structural event reported by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A start tag, including the start half of a self-closing tag.
    StartTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes, sorted by name so output is stable.
        attributes: BTreeMap<String, String>,
    },
    /// An end tag, or the end half of a self-closing tag.
    EndTag {
        /// Lower-cased tag name.
        name: String,
    },
    /// A run of consecutive body-text characters.
    Text {
        /// The characters, decoded if the collector was asked to.
        text: String,
    },
    /// End of stream.
    Finish,
}

/// How an [`EventCollector`] treats body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Drop body text entirely.
    Skip,
    /// Keep body text exactly as scanned.
    #[default]
    Raw,
    /// Keep body text and decode entity references in it.
    Decoded,
}

/// Records every event into a list.
///
/// Consecutive text characters are coalesced into a single
/// [`Event::Text`], flushed when the next tag event or the end of stream
/// arrives.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
    text_mode: TextMode,
    pending_text: String,
}

impl EventCollector {
    /// A collector that keeps raw body text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector with the given text handling.
    #[must_use]
    pub fn with_text_mode(text_mode: TextMode) -> Self {
        Self {
            text_mode,
            ..Self::default()
        }
    }

    /// Events recorded so far. Text still being coalesced is not included.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Flush pending text and return all recorded events.
    #[must_use]
    pub fn into_events(mut self) -> Vec<Event> {
        self.flush_text();
        self.events
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let raw = mem::take(&mut self.pending_text);
        let text = match self.text_mode {
            TextMode::Decoded => decode_body(&raw).into_owned(),
            TextMode::Raw | TextMode::Skip => raw,
        };
        self.events.push(Event::Text { text });
    }
}

impl TagReceiver for EventCollector {
    fn on_tag(&mut self, name: &str, attributes: &AttributeMap) {
        self.flush_text();
        self.events.push(Event::StartTag {
            name: name.to_owned(),
            attributes: attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        });
    }

    fn on_end_tag(&mut self, name: &str) {
        self.flush_text();
        self.events.push(Event::EndTag {
            name: name.to_owned(),
        });
    }

    fn on_text(&mut self, c: char) {
        if self.text_mode != TextMode::Skip {
            self.pending_text.push(c);
        }
    }

    fn on_finish(&mut self) {
        self.flush_text();
        self.events.push(Event::Finish);
    }
}
