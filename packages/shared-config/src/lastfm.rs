//! Last.fm configuration types

use crate::{get_required_env, ConfigResult};

/// Last.fm catalog-search configuration
#[derive(Clone)]
pub struct LastfmConfig {
    /// API key for the Last.fm web service
    pub api_key: String,
}

impl std::fmt::Debug for LastfmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastfmConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl LastfmConfig {
    /// Load Last.fm configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` when `LASTFM_API_KEY` is absent
    /// or empty.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api_key: get_required_env("LASTFM_API_KEY")?,
        })
    }
}
