//! Upstream completion client for the Oneira dream interpretation service.
//!
//! Provides the chat-format wire DTOs, the [`CompletionEnvelope`] union
//! over every response shape the service has been observed to return, the
//! response text extractor, and the [`CompletionBackend`] trait with its
//! production reqwest implementation.

mod backend;
mod client;
mod dto;
mod envelope;
mod extract;

pub use backend::CompletionBackend;
pub use client::CompletionClient;
pub use dto::{ChatMessage, ChatRequest};
pub use envelope::{
    ChatChoice, ChatResponse, CompletionEnvelope, ContentBlock, OutputItem, OutputText,
    OutputTextBlock, ResponsesEnvelope, TextValue,
};
pub use extract::extract_text;
