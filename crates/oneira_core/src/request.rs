//! The immutable value describing one generation attempt.

use crate::{TaskContent, TaskKind};
use serde::{Deserialize, Serialize};

/// Locale used when the caller does not specify one.
pub const DEFAULT_LANGUAGE: &str = "pt";

/// Immutable description of one generation attempt.
///
/// # Examples
///
/// ```
/// use oneira_core::{GenerationRequest, TaskContent, TaskKind};
///
/// let request = GenerationRequest::new(
///     TaskKind::Interpretation,
///     TaskContent::Dream("I was flying over a burning city".to_string()),
///     "pt",
/// );
/// assert_eq!(request.language().as_str(), "pt");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Which task profile drives this generation
    task: TaskKind,
    /// The task's input payload
    content: TaskContent,
    /// Requested output language (ISO-ish locale code)
    #[builder(default = "DEFAULT_LANGUAGE.to_string()")]
    language: String,
}

impl GenerationRequest {
    /// Creates a new generation request.
    pub fn new(task: TaskKind, content: TaskContent, language: impl Into<String>) -> Self {
        Self {
            task,
            content,
            language: language.into(),
        }
    }

    /// Returns a builder for constructing a GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}
