//! Tests for splitting text into keyword chunks

use super::super::chunk;
use super::two_event_text;
use crate::Error;

#[test]
fn test_splits_on_keyword_lines() {
    let chunks = chunk(&two_event_text(), &["EVENT"]).unwrap();

    assert_eq!(chunks.len(), 2);
    let events: Vec<_> = chunks.get("EVENT").collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start_line(), 1);
    assert_eq!(events[1].start_line(), 7);
}

#[test]
fn test_blank_lines_stay_in_current_chunk() {
    let chunks = chunk(&two_event_text(), &["EVENT"]).unwrap();
    let first = chunks.get("EVENT").next().unwrap();

    assert_eq!(first.lines.len(), 6);
    assert!(first.lines[5].is_blank());
    assert_eq!(first.lines[5].raw, "");
}

#[test]
fn test_quoted_arguments_are_single_tokens() {
    let chunks = chunk(&two_event_text(), &["EVENT"]).unwrap();
    let first = chunks.get("EVENT").next().unwrap();

    assert_eq!(first.lines[0].tokens, vec!["EVENT", "Storm 1"]);
    assert_eq!(first.lines[3].tokens, vec!["COORD", "1.0", "2.0", "Only Gage"]);
}

#[test]
fn test_raw_chunk_text_is_verbatim() {
    let chunks = chunk(&two_event_text(), &["EVENT"]).unwrap();
    let second = chunks.get("EVENT").nth(1).unwrap();
    assert_eq!(second.raw(), "EVENT \"Storm 2\"\nNRGAG 0\nNRPDS 0");
}

#[test]
fn test_leading_blank_lines_are_ignored() {
    let text = format!("\n\n{}", two_event_text());
    let chunks = chunk(&text, &["EVENT"]).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks.iter().next().unwrap().start_line(), 3);
}

#[test]
fn test_content_before_first_keyword_fails() {
    let text = format!("GARBAGE 1 2\n{}", two_event_text());
    match chunk(&text, &["EVENT"]) {
        Err(Error::Format { line, .. }) => assert_eq!(line, Some(1)),
        other => panic!("Expected format error, got {:?}", other),
    }
}

#[test]
fn test_keyword_must_be_whole_first_word() {
    let text = "EVENT \"a\"\nEVENTS 3\n  EVENT \"b\"";
    let chunks = chunk(text, &["EVENT"]).unwrap();

    // "EVENTS" does not open a chunk; indented "EVENT" does
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks.iter().next().unwrap().lines.len(), 2);
}

#[test]
fn test_multiple_keywords_keep_source_order() {
    let text = "A 1\nB 2\nA 3\nline\nB 4";
    let chunks = chunk(text, &["A", "B"]).unwrap();

    let order: Vec<_> = chunks.iter().map(|c| c.keyword.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "A", "B"]);
    assert_eq!(chunks.get("A").nth(1).unwrap().lines.len(), 2);
}

#[test]
fn test_empty_input_has_no_chunks() {
    assert!(chunk("", &["EVENT"]).unwrap().is_empty());
}
