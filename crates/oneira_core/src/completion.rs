//! Request type for the upstream completion service.

use crate::Message;
use serde::{Deserialize, Serialize};

/// One call to the completion service.
///
/// `model` overrides the client's configured default when set; the repair
/// call reuses the same model as the attempt it is correcting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Creates a request with the given conversation and provider defaults
    /// for everything else.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}
