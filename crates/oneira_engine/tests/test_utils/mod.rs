//! Test utilities for Oneira engine tests.
//!
//! Provides a scripted mock completion backend and envelope helpers.

use async_trait::async_trait;
use oneira_core::CompletionRequest;
use oneira_error::UpstreamError;
use oneira_models::{CompletionBackend, CompletionEnvelope};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A completion backend that replays a scripted queue of responses and
/// records every request it receives.
pub struct MockBackend {
    responses: Mutex<VecDeque<Result<CompletionEnvelope, UpstreamError>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockBackend {
    /// Replays the given responses in order; once exhausted, answers with
    /// an empty chat envelope.
    pub fn scripted(responses: Vec<Result<CompletionEnvelope, UpstreamError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Convenience for a script of plain-text chat responses.
    pub fn of_texts(texts: &[&str]) -> Self {
        Self::scripted(
            texts
                .iter()
                .map(|text| Ok(CompletionEnvelope::from_text(*text)))
                .collect(),
        )
    }

    /// Number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionEnvelope, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Ok(CompletionEnvelope::from_text("")))
    }
}

/// Builds an envelope that deserializes but matches no known text shape.
pub fn unrecognizable_envelope() -> CompletionEnvelope {
    serde_json::from_value(serde_json::json!({ "id": "resp_x", "object": "unknown" }))
        .expect("envelope should deserialize")
}
