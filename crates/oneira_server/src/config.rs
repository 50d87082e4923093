//! Service configuration from environment variables.

use derive_getters::Getters;
use oneira_error::ConfigError;
use tracing::debug;

/// Model used when `ONEIRA_MODEL` is unset or blank.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Endpoint used when `ONEIRA_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 10000;

/// Configuration for the Oneira service, constructed once at startup and
/// passed by reference; request handling never reads ambient environment
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServiceConfig {
    /// API key for the completion service
    api_key: String,
    /// Model identifier
    model: String,
    /// Full URL of the chat completions endpoint
    base_url: String,
    /// Language used when a request does not specify one
    default_language: String,
    /// Port the HTTP server binds
    port: u16,
}

impl ServiceConfig {
    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `ONEIRA_API_KEY` (required)
    /// - `ONEIRA_MODEL` (default: "gpt-4.1-mini")
    /// - `ONEIRA_BASE_URL` (default: the OpenAI chat completions endpoint)
    /// - `ONEIRA_DEFAULT_LANGUAGE` (default: "pt")
    /// - `PORT` (default: 10000)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or the port is
    /// unparseable, so a bad deploy fails at startup instead of as a
    /// downstream one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ONEIRA_API_KEY")
            .map_err(|_| ConfigError::new("ONEIRA_API_KEY not set"))?;

        let raw_model = std::env::var("ONEIRA_MODEL").ok();
        let model = resolve_model(raw_model.as_deref());
        debug!(raw = ?raw_model, resolved = %model, "Resolved completion model");

        let base_url =
            std::env::var("ONEIRA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let default_language = std::env::var("ONEIRA_DEFAULT_LANGUAGE")
            .unwrap_or_else(|_| oneira_core::DEFAULT_LANGUAGE.to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::new(format!("PORT is not a valid port: {:?}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ServiceConfigBuilder::default()
            .api_key(api_key)
            .model(model)
            .base_url(base_url)
            .default_language(default_language)
            .port(port)
            .build()
            .expect("Valid ServiceConfig"))
    }
}

/// Resolves the model identifier from a raw environment value, trimming
/// whitespace that routinely sneaks into deployment dashboards.
pub fn resolve_model(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => DEFAULT_MODEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_model_defaults_when_unset_or_blank() {
        assert_eq!(resolve_model(None), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some("")), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some("   ")), DEFAULT_MODEL);
    }

    #[test]
    fn resolve_model_trims_whitespace() {
        assert_eq!(resolve_model(Some(" gpt-4o \n")), "gpt-4o");
    }
}
