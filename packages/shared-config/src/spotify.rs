//! Spotify delegated-auth configuration types

use crate::{get_required_env, ConfigError, ConfigResult};

/// Spotify application configuration
///
/// All three values are required: the authorization-code exchange cannot
/// work without them, so loading fails closed instead of falling back to
/// a shared literal credential.
#[derive(Clone)]
pub struct SpotifyConfig {
    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect URI registered with the Spotify application
    pub redirect_uri: String,
}

impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl SpotifyConfig {
    /// Load Spotify configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` when `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET` or `SPOTIFY_REDIRECT_URI` is absent or empty,
    /// and `ConfigError::InvalidUrl` when the redirect URI does not parse.
    pub fn from_env() -> ConfigResult<Self> {
        let redirect_uri = get_required_env("SPOTIFY_REDIRECT_URI")?;
        if url::Url::parse(&redirect_uri).is_err() {
            return Err(ConfigError::InvalidUrl(
                "SPOTIFY_REDIRECT_URI".to_string(),
                redirect_uri,
            ));
        }

        Ok(Self {
            client_id: get_required_env("SPOTIFY_CLIENT_ID")?,
            client_secret: get_required_env("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri,
        })
    }
}
