//! Spotify API error types

use thiserror::Error;

/// Spotify API client errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Spotify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spotify returned a non-success status
    ///
    /// Carries the upstream status code so callers can propagate it.
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("Request to Spotify timed out")]
    Timeout,
}

impl SpotifyError {
    /// The upstream HTTP status for API errors, if any
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Spotify operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;
