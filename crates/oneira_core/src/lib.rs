//! Core data types for the Oneira dream interpretation service.
//!
//! This crate provides the foundation data types used across the Oneira
//! workspace: conversation roles and messages, the task taxonomy, and the
//! request/result values exchanged with the generation engine.

mod completion;
mod message;
mod request;
mod result;
mod role;
mod task;

pub use completion::CompletionRequest;
pub use message::Message;
pub use request::{DEFAULT_LANGUAGE, GenerationRequest, GenerationRequestBuilder};
pub use result::NormalizedResult;
pub use role::Role;
pub use task::{DreamSummary, TaskContent, TaskKind};
