//! The completion service's response envelopes.
//!
//! The upstream API evolved from a verbose structured envelope to a
//! simplified one, and the chat-style endpoint has its own shape. Different
//! task call-sites may hit either API variant, so all shapes are modeled as
//! one untagged union and matched exhaustively in [`crate::extract_text`]
//! rather than probed field-by-field.

use serde::Deserialize;

/// Every response shape the completion service is known to return.
///
/// Deserialization tries the chat shape first (it is the only one with a
/// required discriminating field); anything else lands in the responses
/// shape, whose fields are all optional. An unrecognizable body therefore
/// parses as an empty responses envelope and fails at extraction time, not
/// at the transport layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CompletionEnvelope {
    /// Chat-style: `choices[0].message.content`
    Chat(ChatResponse),
    /// Responses-style: `output_text` or `output[0].content[0]`
    Responses(ResponsesEnvelope),
}

impl CompletionEnvelope {
    /// Builds a chat-shaped envelope around plain text. Test and fallback
    /// helper; the wire never produces envelopes this way.
    pub fn from_text(text: impl Into<String>) -> Self {
        CompletionEnvelope::Chat(ChatResponse {
            choices: vec![ChatChoice {
                message: crate::ChatMessage {
                    role: "assistant".to_string(),
                    content: text.into(),
                },
                finish_reason: None,
            }],
        })
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response choices
    pub choices: Vec<ChatChoice>,
}

/// A choice in the chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The message content
    pub message: crate::ChatMessage,
    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Responses-style envelope (both the simplified and verbose variants).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesEnvelope {
    /// Simplified top-level text field
    #[serde(default)]
    pub output_text: Option<OutputText>,
    /// Verbose structured output list
    #[serde(default)]
    pub output: Option<Vec<OutputItem>>,
}

/// The simplified `output_text` field: a string, or a list whose first
/// element is a string or a `{ text }` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OutputText {
    Text(String),
    Blocks(Vec<OutputTextBlock>),
}

/// An element of an `output_text` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OutputTextBlock {
    Text(String),
    Tagged {
        /// Text payload of the block
        text: String,
    },
}

/// An item in the verbose `output` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    /// Content blocks of this item
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A content block: its `text` is a plain string or a `{ value }` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlock {
    /// Text payload, when present
    #[serde(default)]
    pub text: Option<TextValue>,
}

/// Text carried directly or behind a `value` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Valued {
        /// The wrapped string
        value: String,
    },
}
