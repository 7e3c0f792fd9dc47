//! Core Ollama HTTP client

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use moodtune_shared_config::OllamaConfig;

use crate::error::{OllamaError, OllamaResult};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, GenerateOptions, ListModelsResponse};

/// Maximum error body size to prevent memory exhaustion
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Ollama API client with connection pooling
///
/// Each call issues exactly one upstream request: a failed call is final
/// for the current pipeline run.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// HTTP client with connection pool
    http_client: Client,
    /// Configuration
    config: OllamaConfig,
}

impl OllamaClient {
    /// Create a new Ollama client from configuration
    pub fn new(config: &OllamaConfig) -> OllamaResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(OllamaError::HttpError)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Create a client with custom HTTP client (for testing)
    pub fn with_client(config: &OllamaConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Truncate error body to prevent memory exhaustion
    /// Safely handles UTF-8 boundaries to avoid panics on multi-byte characters
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    /// Map a transport error to the matching client error
    fn map_transport_error(&self, e: reqwest::Error) -> OllamaError {
        if e.is_connect() {
            OllamaError::ConnectionRefused(self.config.url.clone())
        } else if e.is_timeout() {
            OllamaError::Timeout(self.config.timeout_secs)
        } else {
            OllamaError::HttpError(e)
        }
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> OllamaResult<bool> {
        match self.http_client.get(self.config.tags_url()).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) if e.is_connect() => {
                Err(OllamaError::ConnectionRefused(self.config.url.clone()))
            }
            Err(e) => Err(OllamaError::HttpError(e)),
        }
    }

    /// List available models
    pub async fn list_models(&self) -> OllamaResult<Vec<String>> {
        let response = self
            .http_client
            .get(self.config.tags_url())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
            return Err(OllamaError::ApiError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let list: ListModelsResponse = response.json().await?;
        Ok(list.models.into_iter().map(|m| m.name).collect())
    }

    /// Chat with the model using the configured generation options
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> OllamaResult<String> {
        self.chat_with_options(messages, None).await
    }

    /// Chat with custom generation options
    ///
    /// Sends a single non-streaming chat request and returns the
    /// assistant's reply content.
    pub async fn chat_with_options(
        &self,
        messages: Vec<ChatMessage>,
        options: Option<GenerateOptions>,
    ) -> OllamaResult<String> {
        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending chat request"
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
            options: options.or_else(|| {
                Some(GenerateOptions {
                    temperature: Some(self.config.temperature),
                    num_predict: Some(self.config.max_tokens),
                    ..Default::default()
                })
            }),
        };

        let response = self
            .http_client
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());

            if body.contains("model") && body.contains("not found") {
                return Err(OllamaError::ModelNotFound(self.config.model.clone()));
            }

            return Err(OllamaError::ApiError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        debug!(
            response_len = chat_response.message.content.len(),
            "Chat response received"
        );

        Ok(chat_response.message.content)
    }
}
