//! Error-to-response mapping.
//!
//! Callers get "try again" grade degradation: a generic apology with the
//! right status code, never a raw upstream error body or a stack trace.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use oneira_error::{OneiraError, OneiraErrorKind};
use serde_json::json;
use tracing::error;

/// Wraps [`OneiraError`] for use as an axum rejection.
#[derive(Debug)]
pub struct ApiError(OneiraError);

impl From<OneiraError> for ApiError {
    fn from(err: OneiraError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.kind() {
            OneiraErrorKind::Request(e) => (StatusCode::BAD_REQUEST, e.message.clone()),
            OneiraErrorKind::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Não consegui falar com o serviço de interpretação agora. Tente novamente."
                    .to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Não consegui interpretar seu sonho agora. Tente novamente.".to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error = %self.0, "Generation failed");
        }

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// A 400 with the standard error payload, for handler-level validation.
pub fn bad_request(message: &str) -> ApiError {
    ApiError(oneira_error::RequestError::new(message).into())
}
