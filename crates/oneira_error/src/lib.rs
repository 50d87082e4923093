//! Error types for the Oneira dream interpretation service.
//!
//! This crate provides the foundation error types used throughout the
//! Oneira workspace. Only [`ConfigError`], [`UpstreamError`] and
//! [`RequestError`] cross the core's boundary as hard failures; extraction
//! and parse failures are absorbed by the engine's best-effort
//! normalization path.

mod config;
mod extraction;
mod parse;
mod request;
mod upstream;

pub use config::ConfigError;
pub use extraction::ExtractionError;
pub use parse::ParseError;
pub use request::RequestError;
pub use upstream::{UpstreamError, UpstreamErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum OneiraErrorKind {
    /// Missing or unusable configuration
    Config(ConfigError),
    /// Completion service failure (network/auth/quota)
    Upstream(UpstreamError),
    /// Response envelope matched no known shape
    Extraction(ExtractionError),
    /// No recoverable JSON object in model output
    Parse(ParseError),
    /// Invalid inbound request payload
    Request(RequestError),
}

impl std::fmt::Display for OneiraErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OneiraErrorKind::Config(e) => write!(f, "{}", e),
            OneiraErrorKind::Upstream(e) => write!(f, "{}", e),
            OneiraErrorKind::Extraction(e) => write!(f, "{}", e),
            OneiraErrorKind::Parse(e) => write!(f, "{}", e),
            OneiraErrorKind::Request(e) => write!(f, "{}", e),
        }
    }
}

/// Oneira error with kind discrimination.
#[derive(Debug)]
pub struct OneiraError(Box<OneiraErrorKind>);

impl OneiraError {
    /// Create a new error from a kind.
    pub fn new(kind: OneiraErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &OneiraErrorKind {
        &self.0
    }
}

impl std::fmt::Display for OneiraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Oneira Error: {}", self.0)
    }
}

impl std::error::Error for OneiraError {}

// Generic From implementation for any type that converts to OneiraErrorKind
impl<T> From<T> for OneiraError
where
    T: Into<OneiraErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Oneira operations.
pub type OneiraResult<T> = std::result::Result<T, OneiraError>;
