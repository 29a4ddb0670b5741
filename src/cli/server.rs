//! Browser chat surface: one HTML page plus a small JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::{ChatAgent, ChatBubble, SessionKey};
use crate::error::{ChatError, ErrorCategory};

const INDEX_HTML: &str = include_str!("chat.html");

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub agent: ChatAgent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: SessionKey,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatBubble>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendResponse {
    /// `None` when the submission was blank.
    pub reply: Option<ChatBubble>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub retryable: bool,
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/:key/messages",
            get(list_messages).post(send_message),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(agent: ChatAgent, bind: &str) -> Result<(), ChatError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "chat server listening");
    axum::serve(listener, create_router(AppState { agent })).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: state.agent.open_session().await,
    })
}

/// Parse a path key and require that the session was opened first.
async fn known_session(state: &AppState, key: &str) -> Result<SessionKey, AppError> {
    let key: SessionKey = key.parse()?;
    if !state.agent.has_session(&key).await {
        return Err(AppError::NotFound(format!("Unknown session '{key}'")));
    }
    Ok(key)
}

async fn list_messages(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessagesResponse>, AppError> {
    let key = known_session(&state, &key).await?;
    Ok(Json(MessagesResponse {
        messages: state.agent.bubbles(&key).await,
    }))
}

async fn send_message(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>, AppError> {
    let key = known_session(&state, &key).await?;
    let reply = state.agent.submit(&key, &request.text).await?;
    Ok(Json(match reply {
        Some(reply) => SendResponse {
            truncated: reply.outcome.truncated,
            reply: Some(reply.bubble),
        },
        None => SendResponse {
            reply: None,
            truncated: false,
        },
    }))
}

/// Handler error mapped onto an HTTP status.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Turn(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::InvalidArgument(msg) => AppError::BadRequest(msg),
            other => AppError::Turn(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, retryable) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, false),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, false),
            AppError::Turn(e) => {
                let status = match e.category() {
                    ErrorCategory::RateLimit => StatusCode::TOO_MANY_REQUESTS,
                    ErrorCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    ErrorCategory::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string(), e.is_retryable())
            }
        };
        (status, Json(ErrorBody { error, retryable })).into_response()
    }
}
