//! Upstream completion service error types.

/// Upstream error conditions when talking to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamErrorKind {
    /// HTTP transport failure (connect, timeout, TLS)
    Transport(String),
    /// API returned a non-success status
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the service
        message: String,
    },
    /// Response body was not valid JSON at the transport level
    Body(String),
}

impl std::fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamErrorKind::Transport(msg) => write!(f, "transport failure: {}", msg),
            UpstreamErrorKind::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            UpstreamErrorKind::Body(msg) => write!(f, "unreadable response body: {}", msg),
        }
    }
}

/// Upstream error with source location.
///
/// These cross the core boundary as hard failures; the core never retries
/// them (spoken contract with the HTTP layer, which owns user-facing
/// messaging).
///
/// # Examples
///
/// ```
/// use oneira_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::Api {
///     status: 429,
///     message: "quota exceeded".to_string(),
/// });
/// assert!(err.to_string().contains("429"));
/// ```
#[derive(Debug, Clone)]
pub struct UpstreamError {
    /// The error condition
    pub kind: UpstreamErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with the given kind at the current location.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a transport-level error.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Transport(message.into()))
    }

    /// Create an API-status error.
    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Api {
            status,
            message: message.into(),
        })
    }

    /// Create an unreadable-body error.
    #[track_caller]
    pub fn body(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Body(message.into()))
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Upstream Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for UpstreamError {}
