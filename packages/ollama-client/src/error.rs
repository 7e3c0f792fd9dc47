//! Ollama API error types

use thiserror::Error;

/// Ollama API client errors
#[derive(Error, Debug)]
pub enum OllamaError {
    /// Could not connect to the Ollama server
    #[error("could not connect to Ollama at {0}")]
    ConnectionRefused(String),

    /// Request timed out
    #[error("Ollama request timed out after {0} seconds")]
    Timeout(u64),

    /// The configured model is not available on the server
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Ollama returned a non-success status
    #[error("Ollama API error: {0}")]
    ApiError(String),

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("failed to parse Ollama response: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for Ollama operations
pub type OllamaResult<T> = Result<T, OllamaError>;
