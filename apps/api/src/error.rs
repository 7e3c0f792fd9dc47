//! Error handling for the Moodtune API
//!
//! This module provides a unified error type using thiserror, with
//! automatic HTTP status code mapping via Axum's IntoResponse trait.
//! Upstream rejections keep their original status code on the way out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use moodtune_recommender::RecommendError;
use moodtune_spotify_client::SpotifyError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Validation Errors ==========
    /// Missing required field in the request body
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// No catalog tracks matched the generated tags
    #[error("no tracks found for these tags")]
    NoTracksFound,

    // ========== External Service Errors ==========
    /// A dependent service rejected the request; its status is propagated
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The language model produced no usable tags
    #[error("failed to generate tags")]
    NoTags,

    /// Language-model service error
    #[error("AI service error: {0}")]
    AiService(String),

    /// Other dependent-service failure (transport, parse)
    #[error("external service error: {0}")]
    ExternalService(String),

    // ========== Configuration / Internal ==========
    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::MissingField(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::NotFound { .. } | Self::NoTracksFound => StatusCode::NOT_FOUND,

            // Propagated upstream status
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }

            // 502 Bad Gateway (dependent-service failures)
            Self::NoTags | Self::AiService(_) | Self::ExternalService(_) => {
                StatusCode::BAD_GATEWAY
            }

            // 500 Internal Server Error
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NoTracksFound => "NO_TRACKS_FOUND",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::NoTags => "NO_TAGS_GENERATED",
            Self::AiService(_) => "AI_SERVICE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::InvalidInput(msg) => Self::ValidationError(msg),
            RecommendError::Profile { status, message } => Self::Upstream {
                status,
                message: format!("failed to get user profile: {}", message),
            },
            RecommendError::ProfileTransport(msg) => Self::ExternalService(msg),
            RecommendError::NoTags => Self::NoTags,
            RecommendError::NoTracksFound => Self::NoTracksFound,
            RecommendError::Llm(msg) => Self::AiService(msg),
            RecommendError::ModelReplyFormat(msg) => Self::AiService(msg),
        }
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::InvalidInput(msg) => Self::ValidationError(msg),
            SpotifyError::Api { status, message } => Self::Upstream {
                status,
                message: format!("Spotify API error: {}", message),
            },
            other => Self::ExternalService(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}
