//! The generation orchestrator.
//!
//! One generic pipeline consumes any task profile: build the conversation,
//! call the completion service, realize the response into a normalized
//! result, evaluate the quality gate, and on failure issue exactly one
//! corrective re-request. Best effort: the repaired result is returned
//! whether or not it passes, and the pipeline never loops.

use crate::normalize::{normalize, normalize_free_text};
use crate::parse::parse_loose_json;
use crate::profile::{MalformedFallback, OutputFormat, TaskProfile};
use crate::quality::meets_quality;
use oneira_core::{CompletionRequest, GenerationRequest, Message, NormalizedResult};
use oneira_error::OneiraResult;
use oneira_models::{CompletionBackend, CompletionEnvelope, extract_text};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

/// Outcome of realizing one completion response.
enum Realized {
    /// A normalized result subject to the quality gate
    Result(NormalizedResult),
    /// A hard-coded fallback, returned as-is with no repair attempt
    Fallback(NormalizedResult),
}

/// Drives the generation pipeline against a completion backend.
///
/// Generic over [`CompletionBackend`] so tests can inject a scripted mock.
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Debug, Clone)]
pub struct Orchestrator<B> {
    backend: B,
}

impl<B: CompletionBackend> Orchestrator<B> {
    /// Creates an orchestrator over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Runs one generation: initial call, quality gate, and at most one
    /// repair call.
    ///
    /// # Errors
    ///
    /// Returns [`oneira_error::RequestError`] when the payload fails
    /// pre-flight validation (before any upstream call) and
    /// [`oneira_error::UpstreamError`] when a completion call itself fails.
    /// Malformed output never surfaces as an error: it is absorbed by the
    /// repair path or the task's hard-coded fallback.
    #[instrument(skip(self, request), fields(task = %request.task(), language = %request.language()))]
    pub async fn generate(&self, request: &GenerationRequest) -> OneiraResult<NormalizedResult> {
        let profile = TaskProfile::for_kind(*request.task());
        let language = request.language();

        let user = profile.user_content(request)?;
        let mut conversation = vec![
            Message::system(profile.system_prompt(language)),
            Message::user(user),
        ];

        debug!("Requesting completion");
        let envelope = self.backend.complete(&completion(&conversation, profile)).await?;

        let first = match realize(profile, language, &envelope) {
            Realized::Result(result) => result,
            Realized::Fallback(result) => {
                warn!("Malformed output, returning task fallback");
                return Ok(result);
            }
        };

        if meets_quality(&first, profile) {
            debug!("First attempt passed the quality gate");
            return Ok(first);
        }

        warn!("Quality shortfall, issuing repair call");

        conversation.push(Message::assistant(
            serde_json::to_string(&first).unwrap_or_default(),
        ));
        conversation.push(Message::user(profile.repair_instruction(language)));

        let envelope = self.backend.complete(&completion(&conversation, profile)).await?;
        let repaired = match realize(profile, language, &envelope) {
            Realized::Result(result) | Realized::Fallback(result) => result,
        };

        if meets_quality(&repaired, profile) {
            debug!("Repair attempt passed the quality gate");
        } else {
            warn!("Repaired result still below quality, returning best effort");
        }

        Ok(repaired)
    }
}

fn completion(conversation: &[Message], profile: &TaskProfile) -> CompletionRequest {
    CompletionRequest::new(conversation.to_vec()).with_temperature(profile.temperature())
}

fn realize(profile: &TaskProfile, language: &str, envelope: &CompletionEnvelope) -> Realized {
    match profile.output() {
        OutputFormat::Json => {
            let text = match extract_text(envelope) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "No text in completion envelope");
                    return malformed(profile, language);
                }
            };
            match parse_loose_json(&text) {
                Ok(value) => Realized::Result(normalize(value, profile, language)),
                Err(e) => {
                    error!(error = %e, raw = %e.raw, "Failed to recover JSON from model output");
                    malformed(profile, language)
                }
            }
        }
        OutputFormat::FreeText { field, max_chars } => match extract_text(envelope) {
            Ok(text) => Realized::Result(normalize_free_text(&text, field, max_chars, language)),
            Err(e) => {
                warn!(error = %e, "No text in completion envelope");
                malformed(profile, language)
            }
        },
    }
}

fn malformed(profile: &TaskProfile, language: &str) -> Realized {
    match profile.fallback() {
        MalformedFallback::EmptyObject => {
            Realized::Result(normalize(Value::Object(Map::new()), profile, language))
        }
        MalformedFallback::Questions(questions) => {
            let mut result = NormalizedResult::new();
            result.set(
                "questions",
                Value::Array(
                    questions
                        .iter()
                        .map(|q| Value::String((*q).to_string()))
                        .collect(),
                ),
            );
            result.set("language", Value::String(language.to_string()));
            Realized::Fallback(result)
        }
        MalformedFallback::Text(text) => {
            let field = match profile.output() {
                OutputFormat::FreeText { field, .. } => field,
                OutputFormat::Json => "message",
            };
            let mut result = NormalizedResult::new();
            result.set(field, Value::String(text.to_string()));
            result.set("language", Value::String(language.to_string()));
            Realized::Fallback(result)
        }
    }
}
