//! Quality gate predicates.
//!
//! Structural/content heuristics that decide whether a normalized result is
//! acceptable without human review. All functions here are pure and
//! deterministic; thresholds live in the task profiles so they can be tuned
//! without touching control flow.

use crate::profile::TaskProfile;
use oneira_core::NormalizedResult;
use regex::Regex;
use std::sync::LazyLock;

/// Hedging phrases that mark an interpretation as interchangeable between
/// users. Counted case-insensitively, Portuguese and English.
const HEDGE_PHRASES: &[&str] = &[
    "pode indicar",
    "pode significar",
    "talvez signifique",
    "talvez",
    "em geral",
    "geralmente",
    "de certa forma",
    "may indicate",
    "might suggest",
    "in general",
    "perhaps",
    "it is possible that",
];

static ENUMERATED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:[-•*]|\d+[.)])\s+\S").expect("valid enumeration pattern")
});

/// Counts paragraphs: runs of non-blank lines separated by blank lines.
pub fn paragraph_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            in_paragraph = true;
            count += 1;
        }
    }

    count
}

/// Counts enumerated items: lines opening with a `-`/`•`/`*` bullet or
/// `1.`/`1)`-style numbering.
pub fn enumerated_items(text: &str) -> usize {
    ENUMERATED_LINE.find_iter(text).count()
}

/// Counts occurrences of known hedging phrases, case-insensitively.
pub fn hedge_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    HEDGE_PHRASES
        .iter()
        .map(|phrase| lower.matches(phrase).count())
        .sum()
}

/// Quality thresholds for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySpec {
    /// The main narrative field subject to paragraph/length/hedge checks
    pub narrative_field: Option<&'static str>,
    /// Minimum paragraph count for the narrative field
    pub min_paragraphs: usize,
    /// Minimum character length for the narrative field
    pub min_narrative_chars: usize,
    /// Tolerated number of hedge-phrase occurrences in the narrative
    pub max_hedges: usize,
    /// The advice/guidance field subject to actionability checks
    pub advice_field: Option<&'static str>,
    /// Minimum number of enumerated action items in the advice field
    pub min_advice_items: usize,
}

impl QualitySpec {
    /// A spec with no checks; everything passes.
    pub const fn none() -> Self {
        Self {
            narrative_field: None,
            min_paragraphs: 0,
            min_narrative_chars: 0,
            max_hedges: usize::MAX,
            advice_field: None,
            min_advice_items: 0,
        }
    }

    /// A spec that only requires the given field to be non-empty prose of
    /// at least `min_chars` characters.
    pub const fn prose(field: &'static str, min_chars: usize) -> Self {
        Self {
            narrative_field: Some(field),
            min_paragraphs: 1,
            min_narrative_chars: min_chars,
            max_hedges: usize::MAX,
            advice_field: None,
            min_advice_items: 0,
        }
    }
}

/// Decides whether a normalized result is acceptable for its task.
///
/// Pure predicate: same result and profile, same verdict. All sub-checks
/// are ANDed; any failure fails the whole gate.
pub fn meets_quality(result: &NormalizedResult, profile: &TaskProfile) -> bool {
    let spec = profile.quality();

    for field in profile.fields() {
        if field.min_items > 0 {
            let len = result.items(field.name).map_or(0, Vec::len);
            if len < field.min_items {
                return false;
            }
        }
    }

    if let Some(name) = spec.narrative_field {
        let Some(text) = result.text(name) else {
            return false;
        };
        if text.trim().is_empty()
            || text.chars().count() < spec.min_narrative_chars
            || paragraph_count(text) < spec.min_paragraphs
            || hedge_count(text) > spec.max_hedges
        {
            return false;
        }
    }

    if let Some(name) = spec.advice_field {
        let Some(text) = result.text(name) else {
            return false;
        };
        if enumerated_items(text) < spec.min_advice_items || !text.contains('?') {
            return false;
        }
    }

    true
}
