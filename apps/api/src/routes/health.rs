//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/live` - Liveness probe with version info
//! - `GET /health/ready` - Readiness check (verifies the AI backend)

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use moodtune_ollama_client::OllamaClient;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// LLM client, probed by the readiness check
    pub ollama: Arc<OllamaClient>,
}

impl HealthState {
    /// Create new health state
    pub fn new(ollama: OllamaClient) -> Self {
        Self {
            ollama: Arc::new(ollama),
        }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe
///
/// Returns 200 if the server process is running and can handle requests.
/// This does NOT check external dependencies - that's what readiness is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "service": "music-recommendation-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe - checks the language-model backend
///
/// The catalog, video and profile services are keyed per request and not
/// probed here; the local model server is the one dependency worth
/// gating readiness on.
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let ollama_healthy = state.ollama.health_check().await.unwrap_or(false);

    let status_code = if ollama_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ollama_healthy { "ready" } else { "degraded" },
            "checks": {
                "ollama": ollama_healthy,
            },
        })),
    )
}
