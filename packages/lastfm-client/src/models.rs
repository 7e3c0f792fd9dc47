//! Last.fm API response models

use serde::{Deserialize, Serialize};

/// A track returned by a tag top-tracks search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTrack {
    /// Track title
    pub name: String,
    /// Artist name
    pub artist: String,
    /// URL to the Last.fm track page
    pub url: Option<String>,
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksResponse {
    pub tracks: TopTracksWrapper,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksWrapper {
    #[serde(default)]
    pub track: Vec<RawTagTrack>,
    #[serde(rename = "@attr")]
    #[allow(dead_code)] // Required for serde deserialization, not used in code
    pub attr: Option<TopTracksAttr>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)] // Required for serde deserialization
pub(crate) struct TopTracksAttr {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTagTrack {
    pub name: String,
    #[serde(default)]
    pub artist: Option<RawTrackArtist>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrackArtist {
    pub name: String,
}

impl From<RawTagTrack> for TagTrack {
    fn from(raw: RawTagTrack) -> Self {
        Self {
            name: raw.name,
            artist: raw.artist.map(|a| a.name).unwrap_or_default(),
            url: raw.url,
        }
    }
}

/// Last.fm API error response
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: i32,
    pub message: String,
}
