//! Task kinds and their per-task payloads.

use serde::{Deserialize, Serialize};

/// The distinct generation tasks the service performs.
///
/// Each kind resolves to a task profile (prompt template, output schema,
/// quality thresholds) in the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskKind {
    /// Single-dream interpretation with a structured JSON result
    Interpretation,
    /// Reflective-question generation (fixed count of 6)
    Questions,
    /// Deep/shadow-work follow-up analysis
    DeepAnalysis,
    /// History-wide phase/archetype analysis
    PhaseAnalysis,
    /// Single-symbol lookup, free text
    SymbolLookup,
    /// Short daily message, free text
    DailyMessage,
    /// Life-context analysis over recent dreams, free text
    LifeContext,
}

/// A summary of a previously interpreted dream, supplied by the caller.
///
/// Field aliases keep both the legacy and current client payloads working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DreamSummary {
    /// Suggested title of the dream
    #[serde(default, alias = "dreamTitle")]
    pub title: Option<String>,
    /// Main interpretation text
    #[serde(default, alias = "interpretationMain", alias = "interpretation")]
    pub interpretation: Option<String>,
    /// Emotions detected in the dream
    #[serde(default)]
    pub emotions: Vec<String>,
}

/// Per-task input payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TaskContent {
    /// Raw dream narrative
    Dream(String),
    /// Name of a single symbol to look up
    Symbol(String),
    /// Historical dream summaries (newest first)
    History(Vec<DreamSummary>),
    /// Everything the deep-analysis task consumes
    DeepDive {
        /// The original dream narrative
        dream: String,
        /// The first interpretation, as returned to the client
        initial_interpretation: serde_json::Value,
        /// The user's answers to the reflective questions
        answers: serde_json::Value,
    },
    /// Life-context text plus recent dream summaries
    LifeContext {
        /// Free-text description of the user's current situation
        text: String,
        /// Historical dream summaries (newest first)
        history: Vec<DreamSummary>,
    },
}
