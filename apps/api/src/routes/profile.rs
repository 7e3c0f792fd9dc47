//! User profile HTTP route handler
//!
//! - `POST /user_data` - fetch the user's country, genres and top artists

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use moodtune_recommender::Recommender;

use crate::error::{ApiError, ApiResult};

/// Shared application state for profile handlers
#[derive(Clone)]
pub struct ProfileState {
    /// The shared pipeline
    pub recommender: Arc<Recommender>,
}

impl ProfileState {
    /// Create new profile state
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }
}

/// Create profile router
pub fn profile_router(state: ProfileState) -> Router {
    Router::new()
        .route("/user_data", post(user_data))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// User data request body
#[derive(Debug, Deserialize)]
pub struct UserDataRequest {
    /// Delegated-auth access token
    pub access_token: Option<String>,
}

/// User data response
#[derive(Debug, Serialize)]
pub struct UserDataResponse {
    pub user_id: String,
    pub country: String,
    pub genres: Vec<String>,
    pub top_artists: Vec<String>,
}

// ========== Route Handlers ==========

/// Fetch the user's listening profile
///
/// The profile read is fatal and propagates the upstream status; the
/// top-artists read degrades to empty genres.
///
/// # Response
/// - 200 OK: user id, country (default "US"), genres, top artists
/// - 400 Bad Request: missing access_token
/// - upstream status: profile fetch rejected upstream
async fn user_data(
    State(state): State<ProfileState>,
    Json(request): Json<UserDataRequest>,
) -> ApiResult<Json<UserDataResponse>> {
    let access_token = request
        .access_token
        .ok_or(ApiError::MissingField("access_token"))?;

    let profile = state.recommender.fetch_profile(&access_token).await?;

    Ok(Json(UserDataResponse {
        user_id: profile.user_id,
        country: profile.country,
        genres: profile.genres.into_iter().collect(),
        top_artists: profile.top_artists,
    }))
}
