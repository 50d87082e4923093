//! Reqwest client for the chat-format completion API.

use crate::{ChatMessage, ChatRequest, CompletionBackend, CompletionEnvelope};
use async_trait::async_trait;
use oneira_core::CompletionRequest;
use oneira_error::UpstreamError;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Client for the upstream completion service.
///
/// Speaks the chat-completions request format but tolerates either known
/// response envelope, since the service has returned both over its
/// lifetime.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Creates a new completion client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for bearer authentication
    /// * `model` - Default model identifier
    /// * `base_url` - Full URL of the chat completions endpoint
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        let client = Client::new();

        debug!(model = %model, url = %base_url, "Created completion client");

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    /// Returns the default model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|message| ChatMessage {
                role: message.role().as_str().to_string(),
                content: message.content().clone(),
            })
            .collect();

        ChatRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            messages,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionEnvelope, UpstreamError> {
        let chat_request = self.to_chat_request(request);

        debug!(
            model = %chat_request.model,
            message_count = chat_request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                UpstreamError::transport(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Completion API error");

            return Err(UpstreamError::api(status.as_u16(), error_text));
        }

        let envelope: CompletionEnvelope = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            UpstreamError::body(format!("failed to parse body as JSON: {}", e))
        })?;

        debug!("Received completion response");

        Ok(envelope)
    }
}
