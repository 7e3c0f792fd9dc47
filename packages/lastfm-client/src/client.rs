//! Last.fm API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{LastfmError, LastfmResult};
use crate::models::{ErrorResponse, TagTrack, TopTracksResponse};

/// Last.fm API base URL
const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default number of top tracks to request per tag
const DEFAULT_TRACK_LIMIT: u32 = 5;

/// Maximum tag length
const MAX_TAG_LENGTH: usize = 256;

/// Last.fm API client
///
/// Each call issues exactly one upstream request: a failed search is
/// final for the current pipeline run.
#[derive(Clone)]
pub struct LastfmClient {
    http_client: Client,
    api_key: String,
    api_base: String,
}

impl fmt::Debug for LastfmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastfmClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl LastfmClient {
    /// Create a new Last.fm client with the given API key
    ///
    /// # Errors
    /// Returns `LastfmError::MissingApiKey` if the API key is empty
    pub fn new(api_key: impl Into<String>) -> LastfmResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LastfmError::MissingApiKey);
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
            api_key,
            api_base: LASTFM_API_URL.to_string(),
        })
    }

    /// Create a Last.fm client with a custom base URL (for testing)
    #[doc(hidden)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            api_base: base_url.into(),
        }
    }

    /// Create a Last.fm client from environment variable
    ///
    /// Reads `LASTFM_API_KEY` from the environment.
    ///
    /// # Errors
    /// - `LastfmError::MissingApiKey` if the variable is not set or is empty
    pub fn from_env() -> LastfmResult<Self> {
        match std::env::var("LASTFM_API_KEY") {
            Ok(key) if !key.is_empty() => Self::new(key),
            _ => Err(LastfmError::MissingApiKey),
        }
    }

    /// Validate tag input
    fn validate_tag(tag: &str) -> LastfmResult<&str> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(LastfmError::InvalidInput("tag cannot be empty".to_string()));
        }
        if trimmed.len() > MAX_TAG_LENGTH {
            return Err(LastfmError::InvalidInput(format!(
                "tag too long (max {} characters)",
                MAX_TAG_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Make an API request and handle common error cases
    async fn make_request(&self, params: &[(&str, &str)]) -> LastfmResult<String> {
        let response = self
            .http_client
            .get(&self.api_base)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LastfmError::Timeout
                } else {
                    LastfmError::Http(e)
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LastfmError::RateLimited);
        }

        response.text().await.map_err(LastfmError::Http)
    }

    /// Parse response text and handle API errors
    fn parse_api_error(text: &str) -> Option<LastfmError> {
        if let Ok(error) = serde_json::from_str::<ErrorResponse>(text) {
            return Some(LastfmError::Api {
                code: error.error,
                message: error.message,
            });
        }
        None
    }

    /// Get the top tracks for a tag
    ///
    /// # Arguments
    /// * `tag` - The descriptive tag to search for
    /// * `limit` - Maximum number of tracks to return (default: 5)
    ///
    /// # Errors
    /// - `LastfmError::InvalidInput` - If the tag is empty or too long
    /// - `LastfmError::Api` - If Last.fm returns an error
    /// - `LastfmError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn get_tag_top_tracks(
        &self,
        tag: &str,
        limit: Option<u32>,
    ) -> LastfmResult<Vec<TagTrack>> {
        let tag = Self::validate_tag(tag)?;
        let limit = limit.unwrap_or(DEFAULT_TRACK_LIMIT);
        let limit_str = limit.to_string();

        debug!(tag = %tag, limit, "Fetching tag top tracks from Last.fm");

        let text = self
            .make_request(&[
                ("method", "tag.gettoptracks"),
                ("tag", tag),
                ("api_key", &self.api_key),
                ("format", "json"),
                ("limit", &limit_str),
            ])
            .await?;

        // Check for API error response
        if let Some(error) = Self::parse_api_error(&text) {
            return Err(error);
        }

        // Parse as success response
        let response: TopTracksResponse = serde_json::from_str(&text)?;

        let tracks: Vec<TagTrack> = response
            .tracks
            .track
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(tag = %tag, result_count = tracks.len(), "Found tag top tracks");

        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_requires_api_key() {
        let result = LastfmClient::new("");
        assert!(matches!(result, Err(LastfmError::MissingApiKey)));
    }

    #[test]
    fn test_client_accepts_valid_api_key() {
        let result = LastfmClient::new("test_api_key");
        assert!(result.is_ok());
    }

    #[test]
    fn test_client_debug_redacts_api_key() {
        let client = LastfmClient::new("secret_key").unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_validate_tag_empty() {
        let result = LastfmClient::validate_tag("");
        assert!(matches!(result, Err(LastfmError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_tag_whitespace_only() {
        let result = LastfmClient::validate_tag("   ");
        assert!(matches!(result, Err(LastfmError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_tag_too_long() {
        let long_tag = "a".repeat(MAX_TAG_LENGTH + 1);
        let result = LastfmClient::validate_tag(&long_tag);
        assert!(matches!(result, Err(LastfmError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_tag_valid() {
        let result = LastfmClient::validate_tag("  upbeat pop  ");
        assert!(matches!(result, Ok("upbeat pop")));
    }

    #[tokio::test]
    async fn test_get_tag_top_tracks() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("method", "tag.gettoptracks"))
            .and(query_param("tag", "joyful"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": {
                    "track": [
                        {
                            "name": "Good Vibrations",
                            "artist": {"name": "The Beach Boys"},
                            "url": "https://www.last.fm/music/track1",
                        },
                        {
                            "name": "Lovely Day",
                            "artist": {"name": "Bill Withers"},
                        },
                    ],
                    "@attr": {"tag": "joyful"},
                },
            })))
            .mount(&server)
            .await;

        let client = LastfmClient::with_base_url("key", server.uri());
        let tracks = client.get_tag_top_tracks("joyful", None).await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Good Vibrations");
        assert_eq!(tracks[0].artist, "The Beach Boys");
        assert_eq!(tracks[1].artist, "Bill Withers");
        assert!(tracks[1].url.is_none());
    }

    #[tokio::test]
    async fn test_api_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": 6,
                "message": "Invalid parameters",
            })))
            .mount(&server)
            .await;

        let client = LastfmClient::with_base_url("key", server.uri());
        let result = client.get_tag_top_tracks("nonsense", None).await;

        assert!(matches!(
            result,
            Err(LastfmError::Api { code: 6, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_track_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": {"track": [], "@attr": {"tag": "obscure"}},
            })))
            .mount(&server)
            .await;

        let client = LastfmClient::with_base_url("key", server.uri());
        let tracks = client.get_tag_top_tracks("obscure", None).await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = LastfmClient::with_base_url("key", server.uri());
        let result = client.get_tag_top_tracks("anything", None).await;
        assert!(matches!(result, Err(LastfmError::RateLimited)));
    }
}
