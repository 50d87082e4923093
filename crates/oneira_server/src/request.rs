//! Inbound request DTOs.
//!
//! Field aliases keep every historical client payload working: the primary
//! content arrives as `text` or `dreamText` depending on app generation,
//! and `uid` is accepted (for log correlation) everywhere it used to be
//! sent.

use oneira_core::DreamSummary;
use serde::Deserialize;
use serde_json::Value;

/// Body for dream-text tasks (interpretation, deep questions).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DreamTextBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "dreamText")]
    pub dream_text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

impl DreamTextBody {
    /// The dream text, preferring `text` over the legacy `dreamText`.
    pub fn primary_text(&self) -> String {
        self.text
            .clone()
            .or_else(|| self.dream_text.clone())
            .unwrap_or_default()
    }
}

/// Body for the deep-analysis task.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeepAnalysisBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "dreamText")]
    pub dream_text: Option<String>,
    #[serde(default, alias = "initialInterpretation")]
    pub initial_interpretation: Value,
    #[serde(default, alias = "userAnswers")]
    pub user_answers: Value,
    #[serde(default)]
    pub language: Option<String>,
}

impl DeepAnalysisBody {
    /// The dream text, preferring `dreamText` (this route's historical
    /// primary) over `text`.
    pub fn primary_text(&self) -> String {
        self.dream_text
            .clone()
            .or_else(|| self.text.clone())
            .unwrap_or_default()
    }
}

/// Body for the history-wide phase analysis.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GlobalAnalysisBody {
    #[serde(default)]
    pub dreams: Option<Vec<DreamSummary>>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body for the single-symbol lookup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SymbolBody {
    #[serde(default, alias = "name", alias = "text")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body for the daily message.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DailyMessageBody {
    #[serde(default, alias = "recentDreams")]
    pub dreams: Vec<DreamSummary>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

/// Body for the life-context analysis.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LifeContextBody {
    #[serde(default, alias = "lifeText")]
    pub life_text: Option<String>,
    #[serde(default, alias = "recentDreams")]
    pub recent_dreams: Vec<DreamSummary>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}
