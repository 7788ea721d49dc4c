//! Tests for output module

use super::*;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

fn record() -> crate::types::JsonObject {
    json!({"id": "1", "netAmount": 4.99}).as_object().unwrap().clone()
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_message_kinds() {
    let msg = Message::record("shopify_partners_app_credit", record());
    assert!(msg.is_record());
    assert!(!msg.is_state());
    assert_eq!(msg.stream(), Some("shopify_partners_app_credit"));

    let msg = Message::state(json!({"bookmarks": {}}));
    assert!(msg.is_state());
    assert_eq!(msg.stream(), None);
}

#[test]
fn test_record_wire_format() {
    let at = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
    let msg = Message::record_at("shopify_partners_app_credit", record(), at);
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "RECORD",
            "stream": "shopify_partners_app_credit",
            "record": {"id": "1", "netAmount": 4.99},
            "time_extracted": "2024-01-03T12:00:00Z"
        })
    );
}

#[test]
fn test_schema_wire_format() {
    let schema = json!({"type": ["null", "object"], "properties": {"id": {"type": ["null", "string"]}}});
    let msg = Message::schema(
        "shopify_partners_app_credit",
        schema.as_object().unwrap().clone(),
        ["appCreditId"],
        ["occurredAt"],
    );
    assert!(msg.is_schema());
    assert!(!msg.is_record());
    assert_eq!(msg.stream(), Some("shopify_partners_app_credit"));
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "SCHEMA",
            "stream": "shopify_partners_app_credit",
            "schema": schema,
            "key_properties": ["appCreditId"],
            "bookmark_properties": ["occurredAt"]
        })
    );
}

#[test]
fn test_state_wire_format() {
    let msg = Message::state(json!({"bookmarks": {"a": {"start_date": "2024-01-01"}}}));
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({"type": "STATE", "value": {"bookmarks": {"a": {"start_date": "2024-01-01"}}}})
    );
}

// ============================================================================
// Sink Tests
// ============================================================================

#[test]
fn test_json_lines_sink() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.emit(&Message::record("s", record())).unwrap();
    sink.emit(&Message::state(json!({}))).unwrap();
    assert_eq!(sink.written(), 2);

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: Message = serde_json::from_str(lines[0]).unwrap();
    assert!(first.is_record());
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second, json!({"type": "STATE", "value": {}}));
}

#[test]
fn test_memory_sink() {
    let mut sink = MemorySink::new();
    sink.emit(&Message::schema("a", record(), ["id"], Vec::new()))
        .unwrap();
    sink.emit(&Message::record("a", record())).unwrap();
    sink.emit(&Message::record("b", record())).unwrap();
    sink.emit(&Message::state(json!({"n": 1}))).unwrap();
    sink.emit(&Message::state(json!({"n": 2}))).unwrap();

    assert_eq!(sink.messages().len(), 5);
    assert!(sink.schema("a").is_some());
    assert!(sink.schema("b").is_none());
    assert_eq!(sink.records("a").len(), 1);
    assert_eq!(sink.states().len(), 2);
    assert_eq!(sink.last_state(), Some(&json!({"n": 2})));
}

#[test]
fn test_sink_by_mut_ref() {
    fn emit_empty_state<S: MessageSink>(mut sink: S) {
        sink.emit(&Message::state(json!({}))).unwrap();
    }

    let mut sink = MemorySink::new();
    emit_empty_state(&mut sink);
    assert_eq!(sink.messages().len(), 1);
}
