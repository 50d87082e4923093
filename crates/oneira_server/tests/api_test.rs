//! Router smoke tests with a scripted completion backend.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use oneira_core::CompletionRequest;
use oneira_engine::Orchestrator;
use oneira_error::UpstreamError;
use oneira_models::{CompletionBackend, CompletionEnvelope};
use oneira_server::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Answers every completion call with the same text.
struct FixedBackend {
    text: String,
}

#[async_trait]
impl CompletionBackend for FixedBackend {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionEnvelope, UpstreamError> {
        Ok(CompletionEnvelope::from_text(self.text.clone()))
    }
}

/// Fails every completion call at the transport level.
struct DownBackend;

#[async_trait]
impl CompletionBackend for DownBackend {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionEnvelope, UpstreamError> {
        Err(UpstreamError::transport("connection refused"))
    }
}

fn app_with_text(text: &str) -> axum::Router {
    let state = AppState::new(
        Orchestrator::new(FixedBackend {
            text: text.to_string(),
        }),
        "pt",
    );
    router(state)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

fn interpretation_text() -> String {
    json!({
        "dreamTitle": "O Incêndio Observado",
        "interpretationMain": format!(
            "{}\n\n{}",
            "Você sobrevoa a destruição em vez de estar dentro dela: o sonho marca uma posição de observador diante de uma perda que já começou e que você ainda trata como paisagem.",
            "O fogo consome uma estrutura antiga da sua vida enquanto a altitude protege e ao mesmo tempo isola. A distância que evita a dor também adia a escolha que o sonho cobra."
        ),
        "symbols": [
            { "name": "fogo", "meaning": "transformação em curso" },
            { "name": "voo", "meaning": "distanciamento de um conflito" }
        ],
        "emotions": ["medo", "fascínio"],
        "lifeAreas": ["trabalho"],
        "advice": "1. Liste o que está sendo consumido nessa fase.\n2. Escolha uma estrutura para reconstruir primeiro.\n3. Marque a conversa que você vem adiando.\nO que você observa queimar sem intervir?",
        "tags": ["fogo", "voo"],
        "language": "pt"
    })
    .to_string()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = app_with_text("")
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn interpret_route_wraps_result_under_interpretation() {
    let response = app_with_text(&interpretation_text())
        .oneshot(post(
            "/api/dreams/interpret",
            json!({ "dreamText": "I was flying over a burning city" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["interpretation"]["dreamTitle"], "O Incêndio Observado");
    assert_eq!(body["interpretation"]["language"], "pt");
}

#[tokio::test]
async fn legacy_route_returns_bare_result() {
    let response = app_with_text(&interpretation_text())
        .oneshot(post(
            "/interpretarSonho",
            json!({ "text": "I was flying over a burning city" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // No wrapping: the result object itself.
    assert_eq!(body["dreamTitle"], "O Incêndio Observado");
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn wrapped_alias_uses_success_and_data() {
    let response = app_with_text(&interpretation_text())
        .oneshot(post(
            "/api/interpretarSonho",
            json!({ "text": "I was flying over a burning city" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["dreamTitle"], "O Incêndio Observado");
}

#[tokio::test]
async fn missing_dream_text_is_a_bad_request() {
    let response = app_with_text(&interpretation_text())
        .oneshot(post("/api/dreams/interpret", json!({ "language": "pt" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("obrigatório"));
}

#[tokio::test]
async fn global_analysis_requires_a_dream_list() {
    let app = app_with_text(&interpretation_text());

    let missing = app
        .clone()
        .oneshot(post("/api/global-analysis", json!({ "language": "pt" })))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    // An empty list fails pre-flight validation in the engine.
    let empty = app
        .oneshot(post("/api/global-analysis", json!({ "dreams": [] })))
        .await
        .expect("response");
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn daily_message_route_returns_message() {
    let response = app_with_text("Comece o dia anotando a primeira imagem que lembrar da noite.")
        .oneshot(post("/api/daily-message", json!({ "dreams": [] })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("Comece o dia"));
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway_with_generic_message() {
    let state = AppState::new(Orchestrator::new(DownBackend), "pt");
    let response = router(state)
        .oneshot(post("/api/analyze-symbol", json!({ "symbol": "água" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    // Generic apology, never the raw upstream error.
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));
}
