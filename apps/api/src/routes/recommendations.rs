//! Recommendation HTTP route handlers
//!
//! - `POST /recommendations` - run the full mood-to-tracks pipeline
//! - `POST /feedback` - adjust tags from listening feedback and regenerate

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use moodtune_recommender::{
    FeedbackContext, MoodAdjustment, Recommender, TrackCandidate,
};

use crate::error::{ApiError, ApiResult};

/// Shared application state for recommendation handlers
#[derive(Clone)]
pub struct RecommendationState {
    /// The shared pipeline
    pub recommender: Arc<Recommender>,
}

impl RecommendationState {
    /// Create new recommendation state
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }
}

/// Create recommendation router
pub fn recommendation_router(state: RecommendationState) -> Router {
    Router::new()
        .route("/recommendations", post(get_recommendations))
        .route("/feedback", post(process_feedback))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// Recommendation request body
#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    /// Delegated-auth access token
    pub access_token: Option<String>,
    /// Emotion label from a prior detection
    pub emotion: Option<String>,
}

/// Recommendation response
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<TrackCandidate>,
    pub emotion: String,
    pub genres: Vec<String>,
    pub country: String,
}

/// Feedback request body
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// The mood the current recommendations were keyed on
    pub current_mood: Option<String>,
    /// The track playing when feedback was given
    #[serde(default)]
    pub current_track: Option<String>,
    /// Free-text feedback
    pub feedback: Option<String>,
    /// Tags behind the current recommendations
    #[serde(default)]
    pub current_tags: Vec<String>,
}

/// Feedback response
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub bot_response: String,
    pub mood_adjustment: MoodAdjustment,
    pub recommendations: Vec<TrackCandidate>,
}

// ========== Route Handlers ==========

/// Run the full recommendation pipeline for a detected emotion
///
/// profile -> tags -> catalog search -> link resolution, with the standard
/// caps (3 tags searched, 5 tracks per tag, 10 link attempts).
///
/// # Response
/// - 200 OK: candidate list (some may be link-less), emotion, genres,
///   country
/// - 400 Bad Request: missing access_token or emotion
/// - 404 Not Found: no tracks matched any tag
/// - 502 Bad Gateway: the model produced no tags, or a fatal dependency
///   failed without an upstream status
/// - upstream status: profile fetch rejected upstream
async fn get_recommendations(
    State(state): State<RecommendationState>,
    Json(request): Json<RecommendationsRequest>,
) -> ApiResult<Json<RecommendationsResponse>> {
    let access_token = request
        .access_token
        .ok_or(ApiError::MissingField("access_token"))?;
    let emotion = request.emotion.ok_or(ApiError::MissingField("emotion"))?;

    let result = state.recommender.recommend(&access_token, &emotion).await?;

    Ok(Json(RecommendationsResponse {
        recommendations: result.recommendations,
        emotion: result.emotion,
        genres: result.genres,
        country: result.country,
    }))
}

/// Analyze listening feedback and regenerate recommendations
///
/// # Response
/// - 200 OK: friendly reply, mood adjustment, regenerated candidates
/// - 400 Bad Request: missing current_mood or feedback
/// - 404 Not Found: no tracks matched the adjusted tags
/// - 502 Bad Gateway: model call failed or its reply broke the JSON
///   contract
async fn process_feedback(
    State(state): State<RecommendationState>,
    Json(request): Json<FeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let current_mood = request
        .current_mood
        .ok_or(ApiError::MissingField("current_mood"))?;
    let feedback = request.feedback.ok_or(ApiError::MissingField("feedback"))?;

    let outcome = state
        .recommender
        .process_feedback(FeedbackContext {
            current_mood,
            current_track: request.current_track,
            feedback,
            current_tags: request.current_tags,
        })
        .await?;

    Ok(Json(FeedbackResponse {
        bot_response: outcome.bot_response,
        mood_adjustment: outcome.mood_adjustment,
        recommendations: outcome.recommendations,
    }))
}
