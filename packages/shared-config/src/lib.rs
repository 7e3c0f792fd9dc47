//! Shared configuration types for Moodtune services
//!
//! This crate provides common configuration types used by the API server
//! and the CLI driver, ensuring consistency across the application.
//!
//! Credential-bearing values (Spotify client credentials, Last.fm API key,
//! YouTube API key) have no literal fallback defaults: loading fails when
//! they are absent.

mod error;
mod lastfm;
mod ollama;
mod spotify;
mod youtube;

pub use error::{ConfigError, ConfigResult};
pub use lastfm::LastfmConfig;
pub use ollama::OllamaConfig;
pub use spotify::SpotifyConfig;
pub use youtube::YoutubeConfig;

use std::env;

/// Common configuration shared between all services
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Spotify delegated-auth configuration
    pub spotify: SpotifyConfig,

    /// Last.fm catalog-search configuration
    pub lastfm: LastfmConfig,

    /// YouTube video-search configuration
    pub youtube: YoutubeConfig,

    /// Ollama AI configuration
    pub ollama: OllamaConfig,

    /// Environment mode (development, staging, production)
    pub environment: Environment,

    /// Log level (from RUST_LOG or LOG_LEVEL)
    pub log_level: String,
}

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        })
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl CommonConfig {
    /// Load common configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` when any required credential
    /// (`SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI`,
    /// `LASTFM_API_KEY`, `YOUTUBE_API_KEY`) is absent or empty.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            spotify: SpotifyConfig::from_env()?,
            lastfm: LastfmConfig::from_env()?,
            youtube: YoutubeConfig::from_env()?,
            ollama: OllamaConfig::from_env()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse()
                .unwrap_or_default(),
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Helper function to get a required environment variable
///
/// An empty value counts as missing: credentials must be injected
/// explicitly, never defaulted.
pub fn get_required_env(name: &str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
