//! YouTube API error types

use thiserror::Error;

/// YouTube API client errors
#[derive(Error, Debug)]
pub enum YoutubeError {
    /// API key is missing
    #[error("API key is required for YouTube API access")]
    MissingApiKey,

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse YouTube response: {0}")]
    Parse(#[from] serde_json::Error),

    /// YouTube returned a non-success status
    #[error("YouTube API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("Request to YouTube timed out")]
    Timeout,
}

/// Result type for YouTube operations
pub type YoutubeResult<T> = Result<T, YoutubeError>;
