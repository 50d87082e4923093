//! Loose-JSON recovery error types.

/// Parse error with source location.
///
/// No JSON object could be recovered from the model's text output. Carries
/// the original raw text so call sites can log exactly what the model
/// produced instead of swallowing it.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// The raw model output that failed to parse
    pub raw: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with the given message and raw text at the
    /// current location.
    #[track_caller]
    pub fn new(message: impl Into<String>, raw: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            raw: raw.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parse Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ParseError {}
