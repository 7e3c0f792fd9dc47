//! API server configuration

use std::env;

use anyhow::{Context, Result};
use moodtune_shared_config::{CommonConfig, Environment};

/// Default lifetime of a stored playlist in seconds (one hour)
const DEFAULT_PLAYLIST_TTL_SECS: u64 = 3600;

/// API server configuration loaded from environment variables
///
/// Credential loading happens in `CommonConfig` and fails closed: a
/// missing Spotify/Last.fm/YouTube credential refuses to start the server
/// instead of falling back to a shared literal.
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// Lifetime of stored playlists before expiry
    pub playlist_ttl_secs: u64,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            playlist_ttl_secs: env::var("PLAYLIST_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_PLAYLIST_TTL_SECS.to_string())
                .parse()
                .context("Invalid PLAYLIST_TTL_SECS value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}
