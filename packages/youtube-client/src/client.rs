//! YouTube API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use moodtune_shared_config::YoutubeConfig;

use crate::error::{YoutubeError, YoutubeResult};
use crate::models::{ErrorResponse, SearchResponse, SearchResult};

/// YouTube Data API base URL
const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum query length
const MAX_QUERY_LENGTH: usize = 512;

/// YouTube Data API client
///
/// Each call issues exactly one upstream request: a failed search is
/// final for the current pipeline run.
#[derive(Clone)]
pub struct YoutubeClient {
    http_client: Client,
    api_key: String,
    api_base: String,
}

impl fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl YoutubeClient {
    /// Create a new YouTube client from configuration
    ///
    /// # Errors
    /// Returns `YoutubeError::MissingApiKey` if the API key is empty
    pub fn new(config: &YoutubeConfig) -> YoutubeResult<Self> {
        if config.api_key.is_empty() {
            return Err(YoutubeError::MissingApiKey);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Moodtune/1.0")
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            api_base: YOUTUBE_API_URL.to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    #[doc(hidden)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            api_base: base_url.into(),
        }
    }

    /// Search for videos matching a free-text query
    ///
    /// Results come back in the provider's ranking order; callers scan
    /// for the first entry whose kind marks a playable video.
    ///
    /// # Errors
    /// - `YoutubeError::InvalidInput` - If the query is empty or too long
    /// - `YoutubeError::Api` - If YouTube returns an error
    /// - `YoutubeError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> YoutubeResult<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(YoutubeError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        if query.len() > MAX_QUERY_LENGTH {
            return Err(YoutubeError::InvalidInput(format!(
                "search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }

        debug!(query = %query, max_results, "Searching YouTube");

        let max_results_str = max_results.to_string();
        let params: [(&str, &str); 5] = [
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", &max_results_str),
            ("key", &self.api_key),
        ];

        let response = self
            .http_client
            .get(format!("{}/search", self.api_base))
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    YoutubeError::Timeout
                } else {
                    YoutubeError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let search: SearchResponse = response.json().await.map_err(YoutubeError::Http)?;

        let results: Vec<SearchResult> = search.items.into_iter().map(Into::into).collect();

        debug!(result_count = results.len(), "YouTube search complete");

        Ok(results)
    }
}
