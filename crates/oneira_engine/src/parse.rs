//! Loose-JSON recovery from model output.
//!
//! Model output is not guaranteed to be bare JSON even when the prompt
//! demands it; markdown fences and surrounding prose both occur in
//! practice. Recovery here is purely textual and positional and assumes
//! nothing beyond brace balance at the outer level.

use oneira_error::ParseError;
use serde_json::Value;

/// Recovers a JSON object from noisy model output.
///
/// Trims whitespace, strips a leading ```` ```json ````/```` ``` ```` fence
/// and a trailing ```` ``` ```` fence (case-insensitive), slices from the
/// first `{` to the last `}`, and parses the slice.
///
/// # Errors
///
/// Returns [`ParseError`] carrying the original text when no valid JSON
/// object can be recovered.
pub fn parse_loose_json(text: &str) -> Result<Value, ParseError> {
    let mut candidate = text.trim();

    candidate = strip_fences(candidate);

    let first = candidate.find('{');
    let last = candidate.rfind('}');
    let candidate = match (first, last) {
        (Some(open), Some(close)) if close > open => &candidate[open..=close],
        _ => {
            return Err(ParseError::new("no JSON object found in model output", text));
        }
    };

    serde_json::from_str(candidate)
        .map_err(|e| ParseError::new(format!("invalid JSON object: {}", e), text))
}

/// Strips markdown code fences from both ends of the text.
fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();

    let lower = s.to_ascii_lowercase();
    if lower.starts_with("```json") {
        s = s["```json".len()..].trim_start();
    } else if s.starts_with("```") {
        s = s["```".len()..].trim_start();
    }

    if s.ends_with("```") {
        s = s[..s.len() - "```".len()].trim_end();
    }

    s
}
