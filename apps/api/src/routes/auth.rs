//! Delegated-auth HTTP route handlers
//!
//! - `GET /auth/url` - the Spotify authorize URL for the configured app
//! - `POST /auth/token` - exchange a pasted authorization code for tokens
//!
//! The browser redirect handshake itself happens outside this service;
//! the user pastes the resulting code here.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use moodtune_spotify_client::SpotifyClient;

use crate::error::{ApiError, ApiResult};

/// Shared application state for auth handlers
#[derive(Clone)]
pub struct AuthState {
    /// Spotify client
    pub spotify: Arc<SpotifyClient>,
}

impl AuthState {
    /// Create new auth state
    pub fn new(spotify: Arc<SpotifyClient>) -> Self {
        Self { spotify }
    }
}

/// Create auth router
pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/url", get(authorize_url))
        .route("/token", post(exchange_token))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// Authorize-URL response
#[derive(Debug, Serialize)]
pub struct AuthorizeUrlResponse {
    /// URL the user opens in a browser to approve access
    pub authorize_url: String,
}

/// Token exchange request body
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Authorization code pasted from the redirect
    pub auth_code: Option<String>,
}

/// Token exchange response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

// ========== Route Handlers ==========

/// Return the authorize URL for the configured Spotify application
async fn authorize_url(State(state): State<AuthState>) -> Json<AuthorizeUrlResponse> {
    Json(AuthorizeUrlResponse {
        authorize_url: state.spotify.authorize_url(),
    })
}

/// Exchange an authorization code for tokens
///
/// # Request
/// - Method: POST
/// - Path: /auth/token
/// - Body: JSON with `auth_code`
///
/// # Response
/// - 200 OK: access token (plus refresh token and expiry when granted)
/// - 400 Bad Request: missing auth_code
/// - upstream status: Spotify rejected the exchange; its status code and
///   error description are propagated
async fn exchange_token(
    State(state): State<AuthState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let auth_code = request.auth_code.ok_or(ApiError::MissingField("auth_code"))?;

    let tokens = state.spotify.exchange_code(&auth_code).await?;

    Ok(Json(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
    }))
}
