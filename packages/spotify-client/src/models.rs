//! Spotify API response models

use serde::{Deserialize, Serialize};

/// Tokens obtained from the authorization-code exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for web API calls
    pub access_token: String,
    /// Token for refreshing the access token (not always present)
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// The authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Spotify user id
    pub id: String,
    /// ISO country code; absent for some account types
    #[serde(default)]
    pub country: Option<String>,
    /// Display name, if set
    #[serde(default)]
    pub display_name: Option<String>,
}

/// An artist from the top-artists listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name
    pub name: String,
    /// Genre descriptors attached to the artist
    #[serde(default)]
    pub genres: Vec<String>,
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct TopArtistsResponse {
    #[serde(default)]
    pub items: Vec<Artist>,
}

/// Error envelope from the accounts service (token endpoint)
#[derive(Debug, Deserialize)]
pub(crate) struct AuthErrorResponse {
    #[allow(dead_code)] // Required for serde deserialization
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Error envelope from the web API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}
