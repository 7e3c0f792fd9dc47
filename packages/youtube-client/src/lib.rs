//! YouTube video search client for Moodtune
//!
//! Resolves free-text track queries to playable video links via the
//! YouTube Data API v3 `search` endpoint. Links point at YouTube Music
//! (`https://music.youtube.com/watch?v=<id>`).
//!
//! # Example
//!
//! ```rust,no_run
//! use moodtune_youtube_client::YoutubeClient;
//! use moodtune_shared_config::YoutubeConfig;
//!
//! # async fn example(config: YoutubeConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = YoutubeClient::new(&config)?;
//!
//! let results = client.search_videos("Lovely Day Bill Withers", 5).await?;
//! if let Some(video) = results.iter().find_map(|r| r.watch_url()) {
//!     println!("{}", video);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::YoutubeClient;
pub use error::{YoutubeError, YoutubeResult};
pub use models::SearchResult;
