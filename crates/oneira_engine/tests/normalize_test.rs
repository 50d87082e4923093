//! Tests for schema normalization: total defaulting and alias cross-fill.

use oneira_core::TaskKind;
use oneira_engine::{normalize, normalize_free_text, profile::TaskProfile};
use serde_json::{Value, json};

fn interpretation() -> &'static TaskProfile {
    TaskProfile::for_kind(TaskKind::Interpretation)
}

fn phase() -> &'static TaskProfile {
    TaskProfile::for_kind(TaskKind::PhaseAnalysis)
}

#[test]
fn empty_object_yields_every_required_field() {
    let result = normalize(json!({}), interpretation(), "pt");

    for name in ["symbols", "emotions", "lifeAreas", "tags"] {
        assert!(
            result.items(name).is_some(),
            "field {} should be an array, got {:?}",
            name,
            result.get(name)
        );
    }
    assert!(!result.is_blank("dreamTitle"));
    assert!(!result.is_blank("interpretationMain"));
    assert!(!result.is_blank("advice"));
    assert_eq!(result.text("language"), Some("pt"));
}

#[test]
fn non_array_list_values_become_empty_arrays() {
    let parsed = json!({
        "symbols": "a snake",
        "emotions": 42,
        "lifeAreas": { "work": true },
        "tags": null
    });

    let result = normalize(parsed, interpretation(), "pt");

    for name in ["symbols", "emotions", "lifeAreas", "tags"] {
        assert_eq!(result.items(name).map(Vec::len), Some(0), "field {}", name);
    }
}

#[test]
fn populated_fields_survive_untouched() {
    let parsed = json!({
        "dreamTitle": "A Queda",
        "symbols": [{ "name": "fogo", "meaning": "transformação" }],
        "emotions": ["medo"],
        "language": "en"
    });

    let result = normalize(parsed, interpretation(), "pt");

    assert_eq!(result.text("dreamTitle"), Some("A Queda"));
    assert_eq!(result.items("symbols").map(Vec::len), Some(1));
    assert_eq!(result.items("emotions").map(Vec::len), Some(1));
    // The model's own language wins over the request default.
    assert_eq!(result.text("language"), Some("en"));
}

#[test]
fn non_object_input_normalizes_like_an_empty_object() {
    let result = normalize(Value::String("not an object".into()), interpretation(), "pt");

    assert!(result.items("symbols").is_some());
    assert_eq!(result.text("language"), Some("pt"));
}

#[test]
fn legacy_aliases_cross_fill_both_fields() {
    let parsed = json!({
        "summary": "Um ciclo se fechando.",
        "advice": "Dê um passo pequeno hoje."
    });

    let result = normalize(parsed, phase(), "pt");

    assert_eq!(result.text("description"), Some("Um ciclo se fechando."));
    assert_eq!(result.text("summary"), Some("Um ciclo se fechando."));
    assert_eq!(result.text("guidance"), Some("Dê um passo pequeno hoje."));
    assert_eq!(result.text("advice"), Some("Dê um passo pequeno hoje."));
}

#[test]
fn canonical_fields_mirror_back_onto_aliases() {
    let parsed = json!({
        "description": "Texto canônico.",
        "guidance": "Orientação canônica."
    });

    let result = normalize(parsed, phase(), "pt");

    assert_eq!(result.text("summary"), Some("Texto canônico."));
    assert_eq!(result.text("advice"), Some("Orientação canônica."));
}

#[test]
fn normalization_is_idempotent() {
    let parsed = json!({
        "summary": "Só o alias preenchido.",
        "mainChallenge": "Aceitar o fim de um ciclo."
    });

    let once = normalize(parsed, phase(), "pt");
    let twice = normalize(Value::Object(once.clone().into_fields()), phase(), "pt");

    assert_eq!(once, twice);
}

#[test]
fn main_challenge_derives_from_first_key_challenge() {
    let parsed = json!({
        "keyChallenges": ["Nomear o medo", "Sustentar limites"]
    });

    let result = normalize(parsed, phase(), "pt");

    assert_eq!(result.text("mainChallenge"), Some("Nomear o medo"));
}

#[test]
fn main_challenge_placeholder_when_list_is_empty() {
    let result = normalize(json!({}), phase(), "pt");

    assert_eq!(result.items("keyChallenges").map(Vec::len), Some(0));
    let challenge = result.text("mainChallenge").unwrap();
    assert!(challenge.contains("integração"), "got: {}", challenge);
}

#[test]
fn legacy_main_challenge_string_seeds_key_challenges() {
    let parsed = json!({ "mainChallenge": "Dizer não sem culpa" });

    let result = normalize(parsed, phase(), "pt");

    let challenges = result.items("keyChallenges").unwrap();
    assert_eq!(challenges.len(), 1);
    assert_eq!(challenges[0], json!("Dizer não sem culpa"));
}

#[test]
fn phase_name_falls_back_to_phase_title() {
    let parsed = json!({ "phaseTitle": "A Travessia" });

    let result = normalize(parsed, phase(), "pt");

    assert_eq!(result.text("phaseName"), Some("A Travessia"));
}

#[test]
fn free_text_is_trimmed_and_capped() {
    let long = "linha ".repeat(200);

    let result = normalize_free_text(&long, "message", Some(120), "pt");

    let message = result.text("message").unwrap();
    assert!(message.chars().count() <= 120);
    assert_eq!(result.text("language"), Some("pt"));
}

#[test]
fn free_text_without_cap_is_kept_whole() {
    let result = normalize_free_text("  uma mensagem  ", "analysis", None, "en");

    assert_eq!(result.text("analysis"), Some("uma mensagem"));
    assert_eq!(result.text("language"), Some("en"));
}
