//! Inbound request validation error types.

/// Request validation error with source location.
///
/// The caller supplied a payload the task cannot work with (empty dream
/// text, empty history for a history-wide analysis). Raised before any
/// upstream call is made.
#[derive(Debug, Clone)]
pub struct RequestError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RequestError {
    /// Create a new RequestError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Request Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for RequestError {}
