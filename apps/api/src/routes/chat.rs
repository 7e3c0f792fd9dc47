//! Chat-turn HTTP route handler
//!
//! - `POST /chat` - drive one turn of the conversational state machine
//!
//! This is a thin adapter over the shared `Assistant`: sessions live in
//! process memory and reset on restart; the transcript and state travel
//! with the session, keyed by the returned session id.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use moodtune_recommender::{Assistant, TrackCandidate};

use crate::error::{ApiError, ApiResult};
use crate::services::SessionStore;

/// Shared application state for chat handlers
#[derive(Clone)]
pub struct ChatState {
    /// Chat-turn driver over the shared pipeline
    pub assistant: Arc<Assistant>,
    /// Process-memory session store
    pub sessions: Arc<SessionStore>,
}

impl ChatState {
    /// Create new chat state
    pub fn new(assistant: Arc<Assistant>, sessions: Arc<SessionStore>) -> Self {
        Self {
            assistant,
            sessions,
        }
    }
}

/// Create chat router
pub fn chat_router(state: ChatState) -> Router {
    Router::new()
        .route("/chat", post(chat_turn))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// Chat turn request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Session to continue; omit to start a new one
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// The user's message
    pub message: Option<String>,
}

/// Chat turn response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Session id to send with the next turn
    pub session_id: Uuid,
    /// Assistant narration for this turn, in order
    pub replies: Vec<String>,
    /// Current recommendation list, once a pipeline run has produced one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<TrackCandidate>,
}

// ========== Route Handlers ==========

/// Drive one turn of the chat state machine
///
/// # Response
/// - 200 OK: assistant replies for the turn; failures inside the turn are
///   narrated as replies, not HTTP errors, and the machine resets to
///   waiting-for-mood
/// - 400 Bad Request: missing message
async fn chat_turn(
    State(state): State<ChatState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = request.message.ok_or(ApiError::MissingField("message"))?;

    let (session_id, mut session) = state.sessions.checkout(request.session_id);

    let replies = state.assistant.handle_message(&mut session, &message).await;
    let recommendations = session.recommendations().to_vec();

    state.sessions.checkin(session_id, session);

    Ok(Json(ChatResponse {
        session_id,
        replies,
        recommendations,
    }))
}
