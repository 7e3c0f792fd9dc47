//! Spotify API client for Moodtune
//!
//! This crate wraps the two Spotify surfaces the assistant needs:
//! - the accounts service, for the authorization-code token exchange
//! - the web API, for the user profile and top-artists reads
//!
//! # Example
//!
//! ```rust,no_run
//! use moodtune_spotify_client::SpotifyClient;
//! use moodtune_shared_config::SpotifyConfig;
//!
//! # async fn example(config: SpotifyConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(&config)?;
//!
//! let tokens = client.exchange_code("auth-code-from-redirect").await?;
//! let profile = client.get_profile(&tokens.access_token).await?;
//! println!("{} ({})", profile.id, profile.country.as_deref().unwrap_or("US"));
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::{SpotifyClient, DEFAULT_SCOPES};
pub use error::{SpotifyError, SpotifyResult};
pub use models::{Artist, TokenResponse, UserProfile};
