//! Integration tests for the event collector.

use fuzzytag_lexer::{Event, EventCollector, TagReceiver, TextMode, lex_str};
use serde_json::json;

#[test]
fn test_events_serialize_with_type_tag() {
    let events = lex_str(
        "hi<a Href='x' b>there</a>",
        EventCollector::new(),
    )
    .into_events();
    let value = serde_json::to_value(&events).expect("events serialize");
    assert_eq!(
        value,
        json!([
            { "type": "text", "text": "hi" },
            { "type": "start_tag", "name": "a", "attributes": { "b": "", "href": "x" } },
            { "type": "text", "text": "there" },
            { "type": "end_tag", "name": "a" },
            { "type": "finish" },
        ])
    );
}

#[test]
fn test_text_is_flushed_before_tags_and_finish() {
    let mut collector = EventCollector::new();
    collector.on_text('a');
    collector.on_text('b');
    assert!(collector.events().is_empty());

    collector.on_end_tag("p");
    collector.on_text('c');
    collector.on_finish();
    assert_eq!(
        collector.events(),
        &[
            Event::Text {
                text: "ab".to_string()
            },
            Event::EndTag {
                name: "p".to_string()
            },
            Event::Text {
                text: "c".to_string()
            },
            Event::Finish,
        ]
    );
}

#[test]
fn test_into_events_flushes_trailing_text() {
    let mut collector = EventCollector::new();
    collector.on_text('z');
    assert_eq!(
        collector.into_events(),
        vec![Event::Text {
            text: "z".to_string()
        }]
    );
}

#[test]
fn test_skip_mode_records_no_text() {
    let events = lex_str("a<b>c</b>d", EventCollector::with_text_mode(TextMode::Skip)).into_events();
    assert!(events.iter().all(|event| !matches!(event, Event::Text { .. })));
    assert_eq!(events.len(), 3);
}

#[test]
fn test_decoded_mode_decodes_each_run() {
    let events =
        lex_str("&lt;<i>&#33;</i>", EventCollector::with_text_mode(TextMode::Decoded)).into_events();
    let texts: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            Event::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["<", "!"]);
}
