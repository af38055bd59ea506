//! REST facade.
//!
//! Three JSON endpoints plus a health check:
//! - `POST /extract_pdf` — multipart file upload, returns extracted text
//! - `POST /simplify` — simplify text at a level, returns rendered HTML
//!   and a session id for follow-up questions
//! - `POST /chatbot` — answer a question grounded in a summary, given
//!   either explicitly or via the session id
//! - `GET /health` — health check
//!
//! Errors use real HTTP status codes with an OpenAI-style JSON body
//! `{"error": {"message", "type"}}`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::core::chat::{ConversationService, ConversationTurn};
use crate::core::error::Error;
use crate::core::extract;
use crate::core::llm::ChatCompletions;
use crate::core::prompts::SimplificationLevel;
use crate::core::session::SessionStore;
use crate::core::simplify::SimplificationService;

// ============================================================================
// State
// ============================================================================

/// Shared services behind the router.
pub struct AppState {
    pub simplifier: SimplificationService,
    pub conversation: ConversationService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(client: Arc<dyn ChatCompletions>, config: &AppConfig) -> Self {
        Self {
            simplifier: SimplificationService::new(
                client.clone(),
                config.limits.max_document_chars,
            ),
            conversation: ConversationService::new(client),
            sessions: SessionStore::default(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ExtractResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SimplifyRequest {
    text: String,
    level: String,
}

#[derive(Debug, Serialize)]
struct SimplifyResponse {
    /// HTML-rendered summary.
    summary: String,
    /// Handle for follow-up questions; the raw summary is kept
    /// server-side under this id.
    session_id: String,
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct ChatbotRequest {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    history: Vec<ConversationTurn>,
    question: String,
}

#[derive(Debug, Serialize)]
struct ChatbotResponse {
    answer: String,
}

// ============================================================================
// Error Mapping
// ============================================================================

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            Error::Extraction(_) | Error::InvalidLevel(_) | Error::EmptyDocument
            | Error::EmptyQuestion => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            Error::SessionNotFound(_) => (StatusCode::NOT_FOUND, "not_found_error"),
            Error::NoContext => (StatusCode::CONFLICT, "no_context_error"),
            Error::MissingCredential => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            Error::RemoteCall(_) => (StatusCode::BAD_GATEWAY, "remote_call_error"),
        };

        let body = Json(serde_json::json!({
            "error": {
                "message": self.0.to_string(),
                "type": error_type
            }
        }));

        (status, body).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn extract_pdf(
    State(_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Extraction(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::Extraction(e.to_string()))?;
            let text = extract::extract(&bytes)?;
            return Ok(Json(ExtractResponse { text }));
        }
    }

    Err(Error::Extraction("missing multipart field `file`".to_string()).into())
}

async fn simplify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let level: SimplificationLevel = request.level.parse()?;

    let result = state.simplifier.simplify(&request.text, level).await?;

    // The session is created only once simplification succeeds, so a
    // failed attempt leaves nothing behind in the store.
    let session_id = state.sessions.create().await;
    state
        .sessions
        .update(&session_id, |session| {
            session.complete_simplify(request.text.trim().to_string(), result.summary.clone())
        })
        .await?;

    Ok(Json(SimplifyResponse {
        summary: result.html,
        session_id,
        truncated: result.truncated,
    }))
}

async fn chatbot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatbotRequest>,
) -> Result<Json<ChatbotResponse>, ApiError> {
    // An explicit summary wins over a session lookup.
    let summary = match &request.summary {
        Some(summary) if !summary.trim().is_empty() => summary.clone(),
        _ => match &request.session_id {
            Some(id) => state.sessions.get(id).await?.summary,
            None => return Err(Error::NoContext.into()),
        },
    };

    let answer = state
        .conversation
        .ask(&request.question, &request.history, &summary)
        .await?;

    Ok(Json(ChatbotResponse { answer }))
}

// ============================================================================
// Router / Serve
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/extract_pdf", post(extract_pdf))
        .route("/simplify", post(simplify))
        .route("/chatbot", post(chatbot))
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
