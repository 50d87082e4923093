//! Tests for completion envelope deserialization and text extraction.
//!
//! Every envelope shape the upstream service has historically returned must
//! yield its text payload; anything else must fail extraction rather than
//! crash or return garbage.

use oneira_models::{CompletionEnvelope, extract_text};
use serde_json::json;

fn envelope(value: serde_json::Value) -> CompletionEnvelope {
    serde_json::from_value(value).expect("envelope should deserialize")
}

#[test]
fn extracts_chat_choice_content() {
    let env = envelope(json!({
        "choices": [
            { "message": { "role": "assistant", "content": "chat text" } }
        ]
    }));

    assert_eq!(extract_text(&env).unwrap(), "chat text");
}

#[test]
fn extracts_simple_text_string() {
    let env = envelope(json!({ "output_text": "hello" }));

    assert_eq!(extract_text(&env).unwrap(), "hello");
}

#[test]
fn extracts_first_element_of_text_array() {
    let env = envelope(json!({ "output_text": ["first", "second"] }));

    assert_eq!(extract_text(&env).unwrap(), "first");
}

#[test]
fn extracts_text_block_in_array() {
    let env = envelope(json!({ "output_text": [{ "text": "payload" }] }));

    assert_eq!(extract_text(&env).unwrap(), "payload");
}

#[test]
fn extracts_nested_content_string() {
    let env = envelope(json!({
        "output": [ { "content": [ { "text": "nested" } ] } ]
    }));

    assert_eq!(extract_text(&env).unwrap(), "nested");
}

#[test]
fn extracts_nested_content_value_object() {
    let env = envelope(json!({
        "output": [ { "content": [ { "text": { "value": "wrapped" } } ] } ]
    }));

    assert_eq!(extract_text(&env).unwrap(), "wrapped");
}

#[test]
fn empty_output_text_array_falls_back_to_output_path() {
    let env = envelope(json!({
        "output_text": [],
        "output": [ { "content": [ { "text": "fallback" } ] } ]
    }));

    assert_eq!(extract_text(&env).unwrap(), "fallback");
}

#[test]
fn unrecognizable_envelope_fails_extraction() {
    let env = envelope(json!({ "id": "resp_123", "object": "unknown" }));

    let err = extract_text(&env).unwrap_err();
    assert!(err.message.contains("no recognizable output"), "{}", err);
}

#[test]
fn empty_choices_fails_extraction() {
    let env = envelope(json!({ "choices": [] }));

    assert!(extract_text(&env).is_err());
}

#[test]
fn from_text_round_trips_through_extraction() {
    let env = CompletionEnvelope::from_text("direct");

    assert_eq!(extract_text(&env).unwrap(), "direct");
}
