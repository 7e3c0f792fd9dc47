//! Spotify API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use moodtune_shared_config::SpotifyConfig;

use crate::error::{SpotifyError, SpotifyResult};
use crate::models::{
    ApiErrorResponse, Artist, AuthErrorResponse, TokenResponse, TopArtistsResponse, UserProfile,
};

/// Spotify accounts service base URL
const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Spotify web API base URL
const API_BASE_URL: &str = "https://api.spotify.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Scopes requested in the authorize URL
pub const DEFAULT_SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "user-top-read",
    "user-read-recently-played",
    "user-library-read",
    "playlist-read-private",
    "user-follow-read",
];

/// Spotify API client
///
/// Each call issues exactly one upstream request: a failed call is final
/// for the current pipeline run.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
    accounts_base: String,
    api_base: String,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("client_id", &self.config.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl SpotifyClient {
    /// Create a new Spotify client from configuration
    pub fn new(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Moodtune/1.0")
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
            accounts_base: ACCOUNTS_BASE_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
        })
    }

    /// Create a client with custom base URLs (for testing)
    #[doc(hidden)]
    pub fn with_base_urls(
        config: &SpotifyConfig,
        accounts_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            config: config.clone(),
            accounts_base: accounts_base.into(),
            api_base: api_base.into(),
        }
    }

    /// Build the user-facing authorization URL for the configured app
    ///
    /// The user visits this URL in a browser, approves access, and pastes
    /// the `code` query parameter of the redirect back into the assistant.
    pub fn authorize_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &DEFAULT_SCOPES.join(" "))
            .finish();
        format!(
            "{}/authorize?{}",
            self.accounts_base.trim_end_matches('/'),
            query
        )
    }

    /// Map a transport error, distinguishing timeouts
    fn map_transport_error(e: reqwest::Error) -> SpotifyError {
        if e.is_timeout() {
            SpotifyError::Timeout
        } else {
            SpotifyError::Http(e)
        }
    }

    /// Exchange an authorization code for access/refresh tokens
    ///
    /// # Errors
    /// - `SpotifyError::InvalidInput` - If the code is empty
    /// - `SpotifyError::Api` - Upstream rejection, with the upstream status
    ///   and error description
    #[instrument(skip(self, auth_code))]
    pub async fn exchange_code(&self, auth_code: &str) -> SpotifyResult<TokenResponse> {
        let auth_code = auth_code.trim();
        if auth_code.is_empty() {
            return Err(SpotifyError::InvalidInput(
                "authorization code cannot be empty".to_string(),
            ));
        }

        debug!("Exchanging authorization code for tokens");

        let form: [(&str, &str); 5] = [
            ("grant_type", "authorization_code"),
            ("code", auth_code),
            ("redirect_uri", &self.config.redirect_uri),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ];

        let response = self
            .http_client
            .post(format!("{}/api/token", self.accounts_base))
            .form(&form)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<AuthErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error_description)
                .unwrap_or_else(|| "No error details".to_string());
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let tokens: TokenResponse = response.json().await.map_err(Self::map_transport_error)?;

        debug!("Token exchange succeeded");

        Ok(tokens)
    }

    /// Read an error message out of a web-API error envelope
    async fn api_error(response: reqwest::Response) -> SpotifyError {
        let status = response.status().as_u16();
        let message = response
            .json::<ApiErrorResponse>()
            .await
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        SpotifyError::Api { status, message }
    }

    /// Get the authenticated user's profile
    ///
    /// # Errors
    /// - `SpotifyError::Api` - Non-success upstream status (e.g. 401 on an
    ///   expired token), carrying that status
    #[instrument(skip(self, access_token))]
    pub async fn get_profile(&self, access_token: &str) -> SpotifyResult<UserProfile> {
        debug!("Fetching Spotify user profile");

        let response = self
            .http_client
            .get(format!("{}/v1/me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response.json().await.map_err(Self::map_transport_error)
    }

    /// Get the user's top artists (medium term)
    ///
    /// # Arguments
    /// * `limit` - Maximum number of artists to return
    ///
    /// # Errors
    /// - `SpotifyError::Api` - Non-success upstream status
    #[instrument(skip(self, access_token))]
    pub async fn get_top_artists(
        &self,
        access_token: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Artist>> {
        debug!(limit, "Fetching Spotify top artists");

        let limit_str = limit.to_string();
        let query: [(&str, &str); 2] = [("time_range", "medium_term"), ("limit", &limit_str)];

        let response = self
            .http_client
            .get(format!("{}/v1/me/top/artists", self.api_base))
            .query(&query)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let top: TopArtistsResponse = response.json().await.map_err(Self::map_transport_error)?;

        debug!(artist_count = top.items.len(), "Found top artists");

        Ok(top.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> SpotifyConfig {
        SpotifyConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = SpotifyClient::new(&test_config()).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("test-secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_authorize_url_contains_client_and_scopes() {
        let client = SpotifyClient::new(&test_config()).unwrap();
        let url = client.authorize_url();
        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("user-top-read"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access-123",
                "refresh_token": "refresh-456",
                "expires_in": 3600,
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::with_base_urls(&test_config(), server.uri(), server.uri());
        let tokens = client.exchange_code("the-code").await.unwrap();

        assert_eq!(tokens.access_token, "access-123");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-456"));
        assert_eq!(tokens.expires_in, Some(3600));
    }

    #[tokio::test]
    async fn test_exchange_code_rejects_empty() {
        let client = SpotifyClient::new(&test_config()).unwrap();
        let result = client.exchange_code("   ").await;
        assert!(matches!(result, Err(SpotifyError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_propagates_upstream_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code",
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::with_base_urls(&test_config(), server.uri(), server.uri());
        let result = client.exchange_code("bad-code").await;

        match result {
            Err(SpotifyError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid authorization code");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_profile_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1",
                "country": "DE",
                "display_name": "Someone",
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::with_base_urls(&test_config(), server.uri(), server.uri());
        let profile = client.get_profile("token-1").await.unwrap();

        assert_eq!(profile.id, "user-1");
        assert_eq!(profile.country.as_deref(), Some("DE"));
    }

    #[tokio::test]
    async fn test_get_profile_unauthorized_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"status": 401, "message": "The access token expired"},
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::with_base_urls(&test_config(), server.uri(), server.uri());
        let result = client.get_profile("stale").await;

        match result {
            Err(SpotifyError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "The access token expired");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_top_artists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/me/top/artists"))
            .and(query_param("time_range", "medium_term"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"name": "Boards of Canada", "genres": ["idm", "downtempo"]},
                    {"name": "Nina Simone", "genres": ["jazz", "soul"]},
                ],
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::with_base_urls(&test_config(), server.uri(), server.uri());
        let artists = client.get_top_artists("token", 5).await.unwrap();

        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "Boards of Canada");
        assert_eq!(artists[1].genres, vec!["jazz", "soul"]);
    }
}
