//! YouTube Data API configuration types

use crate::{get_required_env, ConfigResult};

/// YouTube video-search configuration
#[derive(Clone)]
pub struct YoutubeConfig {
    /// API key for the YouTube Data API v3
    pub api_key: String,
}

impl std::fmt::Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl YoutubeConfig {
    /// Load YouTube configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` when `YOUTUBE_API_KEY` is absent
    /// or empty.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api_key: get_required_env("YOUTUBE_API_KEY")?,
        })
    }
}
