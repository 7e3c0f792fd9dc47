//! Emotion detection HTTP route handler
//!
//! - `POST /detect_emotion` - classify free-text mood into an emotion label

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use moodtune_recommender::Recommender;

use crate::error::{ApiError, ApiResult};

/// Shared application state for emotion handlers
#[derive(Clone)]
pub struct EmotionState {
    /// The shared pipeline
    pub recommender: Arc<Recommender>,
}

impl EmotionState {
    /// Create new emotion state
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }
}

/// Create emotion detection router
pub fn emotion_router(state: EmotionState) -> Router {
    Router::new()
        .route("/detect_emotion", post(detect_emotion))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// Emotion detection request body
#[derive(Debug, Deserialize)]
pub struct DetectEmotionRequest {
    /// Free-text mood description
    pub text: Option<String>,
}

/// Emotion detection response
#[derive(Debug, Serialize)]
pub struct DetectEmotionResponse {
    /// Lowercase emotion label (`"unknown"` when classification degrades)
    pub emotion: String,
    /// Non-fatal warning when the classifier degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ========== Route Handlers ==========

/// Detect the emotion expressed in free-text mood input
///
/// # Request
/// - Method: POST
/// - Path: /detect_emotion
/// - Body: JSON with `text`
///
/// # Response
/// - 200 OK: emotion label, plus a warning when classification degraded
///   to the `"unknown"` sentinel
/// - 400 Bad Request: missing or empty text
async fn detect_emotion(
    State(state): State<EmotionState>,
    Json(request): Json<DetectEmotionRequest>,
) -> ApiResult<Json<DetectEmotionResponse>> {
    let text = request.text.ok_or(ApiError::MissingField("text"))?;

    let detection = state.recommender.classifier().detect(&text).await?;

    Ok(Json(DetectEmotionResponse {
        emotion: detection.emotion,
        warning: detection.warning,
    }))
}
