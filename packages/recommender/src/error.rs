//! Recommendation pipeline error types

use thiserror::Error;

/// Errors surfaced by the recommendation pipeline
///
/// Fatal dependency failures (profile fetch, token exchange) abort the
/// request; intra-batch failures (one tag's search, one track's link
/// lookup) are logged and skipped and never appear here.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Caller-supplied input failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Profile fetch was rejected upstream; carries the upstream status
    #[error("failed to get user profile ({status}): {message}")]
    Profile { status: u16, message: String },

    /// Profile fetch failed in transport, before any upstream verdict
    #[error("profile service unreachable: {0}")]
    ProfileTransport(String),

    /// The language model produced no usable tags
    #[error("failed to generate tags")]
    NoTags,

    /// No catalog tracks matched any of the generated tags
    #[error("no tracks found for these tags")]
    NoTracksFound,

    /// Language-model call failed
    #[error("AI service error: {0}")]
    Llm(String),

    /// The language model's reply did not match the expected format
    #[error("unexpected AI reply format: {0}")]
    ModelReplyFormat(String),
}

impl RecommendError {
    /// The upstream status code to propagate, if this error carries one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Profile { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for recommendation operations
pub type RecommendResult<T> = Result<T, RecommendError>;
