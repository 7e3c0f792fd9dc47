//! HTTP route handlers for the Moodtune API
//!
//! This module contains all REST endpoint handlers:
//! - Emotion detection
//! - Delegated-auth URL and token exchange
//! - User profile reads
//! - Recommendations and feedback
//! - Playlist creation and download
//! - Chat-turn driving
//! - Health checks

pub mod auth;
pub mod chat;
pub mod emotion;
pub mod health;
pub mod playlist;
pub mod profile;
pub mod recommendations;

pub use auth::{auth_router, AuthState};
pub use chat::{chat_router, ChatState};
pub use emotion::{emotion_router, EmotionState};
pub use health::{health_router, HealthState};
pub use playlist::{playlist_router, PlaylistState};
pub use profile::{profile_router, ProfileState};
pub use recommendations::{recommendation_router, RecommendationState};
