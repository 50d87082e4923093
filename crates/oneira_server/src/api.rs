//! HTTP API for the Oneira backend.
//!
//! The route table carries every historically deployed alias: the Play
//! Store era `/interpretarSonho`, the transitional `/api/...` aliases, and
//! the current `/api/dreams/...` prefix. Each alias maps onto one task
//! kind; wrapping shapes differ per route and are preserved exactly.

use crate::request::{
    DailyMessageBody, DeepAnalysisBody, DreamTextBody, GlobalAnalysisBody, LifeContextBody,
    SymbolBody,
};
use crate::response::{ApiError, bad_request};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use oneira_core::{GenerationRequest, NormalizedResult, TaskContent, TaskKind};
use oneira_engine::Orchestrator;
use oneira_models::CompletionBackend;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

/// Shared state for all routes.
pub struct AppState<B> {
    orchestrator: Arc<Orchestrator<B>>,
    default_language: String,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            default_language: self.default_language.clone(),
        }
    }
}

impl<B: CompletionBackend> AppState<B> {
    /// Creates the state around an orchestrator.
    pub fn new(orchestrator: Orchestrator<B>, default_language: impl Into<String>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            default_language: default_language.into(),
        }
    }

    fn language(&self, requested: Option<&String>) -> String {
        requested
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_language.clone())
    }

    async fn run(
        &self,
        task: TaskKind,
        content: TaskContent,
        language: String,
    ) -> Result<NormalizedResult, ApiError> {
        let request = GenerationRequest::new(task, content, language);
        Ok(self.orchestrator.generate(&request).await?)
    }
}

/// Builds the API router.
pub fn router<B>(state: AppState<B>) -> Router
where
    B: CompletionBackend + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        // Legacy Play Store route: bare result object.
        .route("/interpretarSonho", post(interpret_legacy))
        // Transitional alias: success/data wrapping.
        .route("/api/interpretarSonho", post(interpret_wrapped))
        .route("/api/dreams/interpret", post(interpret))
        .route("/api/dreams/deep-questions", post(deep_questions))
        .route("/api/deep-questions", post(deep_questions))
        .route("/api/dreams/analyze-deep", post(analyze_deep))
        .route("/api/analyze-deep", post(analyze_deep))
        .route("/api/dreams/global-analysis", post(global_analysis))
        .route("/api/global-analysis", post(global_analysis))
        .route("/api/dreams/analyze-symbol", post(analyze_symbol))
        .route("/api/analyze-symbol", post(analyze_symbol))
        .route("/api/daily-message", post(daily_message))
        .route("/api/life-context", post(life_context))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[instrument(skip_all)]
async fn root() -> &'static str {
    "Oneira backend is running."
}

#[instrument(skip_all)]
async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn interpret_dream<B: CompletionBackend>(
    state: &AppState<B>,
    body: &DreamTextBody,
) -> Result<NormalizedResult, ApiError> {
    let text = body.primary_text();
    if text.trim().is_empty() {
        return Err(bad_request("Campo 'text' ou 'dreamText' é obrigatório."));
    }

    info!(
        uid = ?body.uid,
        field = if body.text.is_some() { "text" } else { "dreamText" },
        "Interpreting dream"
    );

    state
        .run(
            TaskKind::Interpretation,
            TaskContent::Dream(text),
            state.language(body.language.as_ref()),
        )
        .await
}

#[instrument(skip_all)]
async fn interpret<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DreamTextBody>,
) -> Result<Json<Value>, ApiError> {
    let result = interpret_dream(&state, &body).await?;
    Ok(Json(json!({ "interpretation": result })))
}

#[instrument(skip_all)]
async fn interpret_wrapped<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DreamTextBody>,
) -> Result<Json<Value>, ApiError> {
    let result = interpret_dream(&state, &body).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

#[instrument(skip_all)]
async fn interpret_legacy<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DreamTextBody>,
) -> Result<Json<NormalizedResult>, ApiError> {
    // The old app expects the result object with no wrapping at all.
    let result = interpret_dream(&state, &body).await?;
    Ok(Json(result))
}

#[instrument(skip_all)]
async fn deep_questions<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DreamTextBody>,
) -> Result<Json<Value>, ApiError> {
    let text = body.primary_text();
    if text.trim().is_empty() {
        return Err(bad_request("Texto do sonho obrigatório."));
    }

    let result = state
        .run(
            TaskKind::Questions,
            TaskContent::Dream(text),
            state.language(body.language.as_ref()),
        )
        .await?;

    let questions = result.get("questions").cloned().unwrap_or_else(|| json!([]));
    Ok(Json(json!({ "questions": questions })))
}

#[instrument(skip_all)]
async fn analyze_deep<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DeepAnalysisBody>,
) -> Result<Json<Value>, ApiError> {
    let dream = body.primary_text();
    if dream.trim().is_empty() {
        return Err(bad_request("Texto do sonho obrigatório."));
    }

    let result = state
        .run(
            TaskKind::DeepAnalysis,
            TaskContent::DeepDive {
                dream,
                initial_interpretation: body.initial_interpretation,
                answers: body.user_answers,
            },
            state.language(body.language.as_ref()),
        )
        .await?;

    Ok(Json(json!({ "analysis": result })))
}

#[instrument(skip_all)]
async fn global_analysis<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<GlobalAnalysisBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(dreams) = body.dreams else {
        return Err(bad_request("Lista de sonhos obrigatória."));
    };

    info!(dream_count = dreams.len(), "Running phase analysis");

    let result = state
        .run(
            TaskKind::PhaseAnalysis,
            TaskContent::History(dreams),
            state.language(body.language.as_ref()),
        )
        .await?;

    let payload = serde_json::to_value(&result).unwrap_or_default();
    Ok(Json(json!({ "success": true, "analysis": payload.clone(), "data": payload })))
}

#[instrument(skip_all)]
async fn analyze_symbol<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<SymbolBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(symbol) = body.symbol.filter(|s| !s.trim().is_empty()) else {
        return Err(bad_request("Nome do símbolo obrigatório."));
    };

    let result = state
        .run(
            TaskKind::SymbolLookup,
            TaskContent::Symbol(symbol),
            state.language(body.language.as_ref()),
        )
        .await?;

    Ok(Json(json!({ "analysis": result.text("analysis") })))
}

#[instrument(skip_all)]
async fn daily_message<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<DailyMessageBody>,
) -> Result<Json<Value>, ApiError> {
    info!(uid = ?body.uid, dream_count = body.dreams.len(), "Generating daily message");

    let result = state
        .run(
            TaskKind::DailyMessage,
            TaskContent::History(body.dreams),
            state.language(body.language.as_ref()),
        )
        .await?;

    Ok(Json(json!({ "success": true, "message": result.text("message") })))
}

#[instrument(skip_all)]
async fn life_context<B: CompletionBackend + 'static>(
    State(state): State<AppState<B>>,
    Json(body): Json<LifeContextBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(text) = body.life_text.filter(|s| !s.trim().is_empty()) else {
        return Err(bad_request("Texto do contexto é obrigatório."));
    };

    info!(uid = ?body.uid, "Analyzing life context");

    let result = state
        .run(
            TaskKind::LifeContext,
            TaskContent::LifeContext {
                text,
                history: body.recent_dreams,
            },
            state.language(body.language.as_ref()),
        )
        .await?;

    Ok(Json(json!({ "success": true, "message": result.text("message") })))
}
