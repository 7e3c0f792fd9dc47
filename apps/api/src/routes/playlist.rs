//! Playlist HTTP route handlers
//!
//! - `POST /playlist` - assemble an M3U playlist from recommendations
//! - `GET /playlist/{id}` - download a stored playlist body
//!
//! Bodies live in an in-memory TTL store rather than temp files, so a
//! forgotten playlist expires instead of leaking.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use moodtune_recommender::{playlist, TrackCandidate};

use crate::error::{ApiError, ApiResult};
use crate::services::PlaylistStore;

/// MIME type of the playlist container format
const M3U_CONTENT_TYPE: &str = "audio/x-mpegurl";

/// Download filename offered to clients
const DOWNLOAD_FILENAME: &str = "music_recommendations.m3u";

/// Shared application state for playlist handlers
#[derive(Clone)]
pub struct PlaylistState {
    /// TTL-expiring playlist store
    pub store: Arc<PlaylistStore>,
}

impl PlaylistState {
    /// Create new playlist state
    pub fn new(store: Arc<PlaylistStore>) -> Self {
        Self { store }
    }
}

/// Create playlist router
pub fn playlist_router(state: PlaylistState) -> Router {
    Router::new()
        .route("/playlist", post(create_playlist))
        .route("/playlist/:id", get(download_playlist))
        .with_state(state)
}

// ========== Request/Response Types ==========

/// Playlist creation request body
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    /// Candidate tracks; only link-bearing ones contribute records
    pub recommendations: Option<Vec<TrackCandidate>>,
}

/// Playlist creation response
#[derive(Debug, Serialize)]
pub struct CreatePlaylistResponse {
    /// Store id of the playlist body
    pub playlist_id: Uuid,
    /// Relative download URL
    pub playlist_url: String,
    /// Number of records in the playlist
    pub entry_count: usize,
    pub message: String,
}

// ========== Route Handlers ==========

/// Assemble an M3U playlist from a recommendation list
///
/// Link-less candidates are skipped; with none linked, the stored body is
/// just the header line.
///
/// # Response
/// - 200 OK: playlist id and download URL
/// - 400 Bad Request: missing recommendations
async fn create_playlist(
    State(state): State<PlaylistState>,
    Json(request): Json<CreatePlaylistRequest>,
) -> ApiResult<Json<CreatePlaylistResponse>> {
    let recommendations = request
        .recommendations
        .ok_or(ApiError::MissingField("recommendations"))?;

    let entry_count = recommendations.iter().filter(|c| c.link.is_some()).count();
    let body = playlist::render(&recommendations);
    let playlist_id = state.store.insert(body);

    tracing::info!(%playlist_id, entry_count, "Playlist created");

    Ok(Json(CreatePlaylistResponse {
        playlist_id,
        playlist_url: format!("/playlist/{}", playlist_id),
        entry_count,
        message: "Playlist created successfully".to_string(),
    }))
}

/// Download a stored playlist body
///
/// # Response
/// - 200 OK: M3U bytes, `audio/x-mpegurl`, attachment filename
/// - 404 Not Found: unknown or expired id
async fn download_playlist(
    State(state): State<PlaylistState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let body = state
        .store
        .get(&id)
        .ok_or_else(|| ApiError::not_found("playlist", id.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, M3U_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        body,
    ))
}
