use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod routes;
mod services;

pub use error::{ApiError, ApiResult, ErrorResponse};

use moodtune_lastfm_client::LastfmClient;
use moodtune_ollama_client::OllamaClient;
use moodtune_recommender::{Assistant, Recommender};
use moodtune_spotify_client::SpotifyClient;
use moodtune_youtube_client::YoutubeClient;

use routes::{
    auth_router, chat_router, emotion_router, health_router, playlist_router, profile_router,
    recommendation_router, AuthState, ChatState, EmotionState, HealthState, PlaylistState,
    ProfileState, RecommendationState,
};
use services::{PlaylistStore, SessionStore};

/// Build the CORS layer based on configuration.
///
/// With `CORS_ORIGINS` set, only those origins are allowed. Without it,
/// production rejects cross-origin requests and development uses
/// permissive CORS for convenience.
fn build_cors_layer(config: &config::Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s)",
                    allowed_origins.len()
                );
                CorsLayer::new().allow_origin(allowed_origins)
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtune_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration (fails closed on missing credentials)
    let config = config::Config::from_env()?;

    tracing::info!("Starting Moodtune API server on port {}", config.port);

    // Build upstream clients
    let spotify = SpotifyClient::new(&config.common.spotify)?;
    let lastfm = LastfmClient::new(config.common.lastfm.api_key.clone())?;
    let youtube = YoutubeClient::new(&config.common.youtube)?;
    let ollama = OllamaClient::new(&config.common.ollama)?;
    tracing::info!("Upstream clients initialized");

    // Assemble the shared pipeline and its chat driver
    let recommender = Arc::new(Recommender::new(
        spotify.clone(),
        lastfm,
        youtube,
        ollama.clone(),
    ));
    let assistant = Arc::new(Assistant::new((*recommender).clone()));
    tracing::info!("Recommendation pipeline initialized");

    // Process-memory stores
    let playlist_store = Arc::new(PlaylistStore::new(Duration::from_secs(
        config.playlist_ttl_secs,
    )));
    let session_store = Arc::new(SessionStore::new());

    // Build the CORS layer from configuration
    let cors_layer = build_cors_layer(&config);

    // Build the router
    let app = Router::new()
        .route("/", get(root))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(ollama)))
        // POST /detect_emotion
        .merge(emotion_router(EmotionState::new(recommender.clone())))
        // GET /auth/url, POST /auth/token
        .nest("/auth", auth_router(AuthState::new(Arc::new(spotify))))
        // POST /user_data
        .merge(profile_router(ProfileState::new(recommender.clone())))
        // POST /recommendations, POST /feedback
        .merge(recommendation_router(RecommendationState::new(
            recommender.clone(),
        )))
        // POST /playlist, GET /playlist/{id}
        .merge(playlist_router(PlaylistState::new(playlist_store)))
        // POST /chat
        .merge(chat_router(ChatState::new(assistant, session_store)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "Welcome to Moodtune - Mood-based Music Recommendations"
}
