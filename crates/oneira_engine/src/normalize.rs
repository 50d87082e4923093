//! Schema normalization.
//!
//! Coerces a parsed-but-possibly-incomplete object into one satisfying the
//! task's full output schema. Total: never fails, never leaves a required
//! field null. Idempotent: normalizing an already-normalized result is a
//! no-op.

use crate::profile::{FieldKind, FieldSpec, TaskProfile, truncate_chars};
use oneira_core::NormalizedResult;
use serde_json::{Map, Value};

/// Normalizes a parsed model object against the task's schema.
///
/// Rules, in order per field:
/// - text fields: cross-fill from aliases, then derive from the first
///   element of a designated list field, then fall back to the schema's
///   placeholder; finally mirror the canonical value back onto blank
///   aliases so legacy clients keep working.
/// - list fields: anything that is not an array becomes one. An alias
///   array is adopted, a non-blank alias string is wrapped in a
///   single-element array, everything else becomes an empty array.
/// - `language` defaults to the request's language when the model omitted
///   it.
pub fn normalize(parsed: Value, profile: &TaskProfile, language: &str) -> NormalizedResult {
    let fields = match parsed {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let mut result = NormalizedResult::from_object(fields);

    for field in profile.fields() {
        match field.kind {
            FieldKind::Text => normalize_text(&mut result, field),
            FieldKind::TextList | FieldKind::PairList(_) => normalize_list(&mut result, field),
        }
    }

    if result.is_blank("language") {
        result.set("language", Value::String(language.to_string()));
    }

    result
}

/// Wraps free prose into a result under the profile's single field,
/// applying the optional character cap.
pub fn normalize_free_text(
    text: &str,
    field: &'static str,
    max_chars: Option<usize>,
    language: &str,
) -> NormalizedResult {
    let text = text.trim();
    let text = match max_chars {
        Some(cap) => truncate_chars(text, cap),
        None => text.to_string(),
    };

    let mut result = NormalizedResult::new();
    result.set(field, Value::String(text));
    result.set("language", Value::String(language.to_string()));
    result
}

fn normalize_text(result: &mut NormalizedResult, field: &FieldSpec) {
    if result.is_blank(field.name) {
        for alias in field.aliases {
            if let Some(text) = non_blank_text(result, alias) {
                result.set(field.name, Value::String(text));
                break;
            }
        }
    }

    if result.is_blank(field.name) {
        if let Some(source) = field.derive_first_from {
            let first = result
                .items(source)
                .and_then(|items| items.first())
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            if let Some(text) = first {
                result.set(field.name, Value::String(text));
            }
        }
    }

    if result.is_blank(field.name) {
        if let Some(placeholder) = field.placeholder {
            result.set(field.name, Value::String(placeholder.to_string()));
        }
    }

    // Mirror canonical -> alias so old client integrations keep working.
    if let Some(text) = non_blank_text(result, field.name) {
        for alias in field.aliases {
            if result.is_blank(alias) {
                result.set(*alias, Value::String(text.clone()));
            }
        }
    }
}

fn normalize_list(result: &mut NormalizedResult, field: &FieldSpec) {
    if matches!(result.get(field.name), Some(Value::Array(_))) {
        return;
    }

    for alias in field.aliases {
        if let Some(Value::Array(items)) = result.get(alias) {
            let items = items.clone();
            result.set(field.name, Value::Array(items));
            return;
        }
        if let Some(text) = non_blank_text(result, alias) {
            result.set(field.name, Value::Array(vec![Value::String(text)]));
            return;
        }
    }

    result.set(field.name, Value::Array(Vec::new()));
}

fn non_blank_text(result: &NormalizedResult, name: &str) -> Option<String> {
    result
        .text(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
