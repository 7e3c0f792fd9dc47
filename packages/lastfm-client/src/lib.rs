//! Last.fm API client for Moodtune
//!
//! This crate provides a client for the Last.fm tag-search API, used to
//! resolve descriptive tags into top tracks.
//!
//! # Example
//!
//! ```rust,no_run
//! use moodtune_lastfm_client::LastfmClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LastfmClient::new("your_api_key")?;
//!
//! let tracks = client.get_tag_top_tracks("melancholy indie", Some(5)).await?;
//! for track in tracks {
//!     println!("{} - {}", track.artist, track.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `LASTFM_API_KEY`: API key for Last.fm (required)

mod client;
mod error;
mod models;

pub use client::LastfmClient;
pub use error::{LastfmError, LastfmResult};
pub use models::TagTrack;
