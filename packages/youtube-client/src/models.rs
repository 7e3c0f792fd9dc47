//! YouTube API response models

use serde::{Deserialize, Serialize};

/// Base URL for playable YouTube Music links
const WATCH_BASE_URL: &str = "https://music.youtube.com/watch";

/// A single search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Result kind (e.g. `youtube#video`, `youtube#channel`)
    pub kind: String,
    /// Video id, present only for video results
    pub video_id: Option<String>,
    /// Result title
    pub title: String,
}

impl SearchResult {
    /// Whether this result is a playable video
    pub fn is_video(&self) -> bool {
        self.kind == "youtube#video" && self.video_id.is_some()
    }

    /// Playable YouTube Music URL for video results
    pub fn watch_url(&self) -> Option<String> {
        if !self.is_video() {
            return None;
        }
        self.video_id
            .as_ref()
            .map(|id| format!("{}?v={}", WATCH_BASE_URL, id))
    }
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawSearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchItem {
    pub id: RawItemId,
    #[serde(default)]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItemId {
    pub kind: String,
    #[serde(rename = "videoId")]
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSnippet {
    #[serde(default)]
    pub title: String,
}

impl From<RawSearchItem> for SearchResult {
    fn from(raw: RawSearchItem) -> Self {
        Self {
            kind: raw.id.kind,
            video_id: raw.id.video_id.filter(|id| !id.is_empty()),
            title: raw.snippet.map(|s| s.title).unwrap_or_default(),
        }
    }
}

/// YouTube API error envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
