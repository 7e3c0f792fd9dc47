//! M3U playlist rendering and parsing
//!
//! The playlist container format is plain text: a fixed header line, then
//! one two-line record per entry, a display line combining artist and
//! track title followed by the playable URL.

use thiserror::Error;

use crate::models::TrackCandidate;

/// Header line of the playlist container format
pub const M3U_HEADER: &str = "#EXTM3U";

/// Prefix of each entry's display line
const EXTINF_PREFIX: &str = "#EXTINF:-1,";

/// One parsed playlist record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Artist name
    pub artist: String,
    /// Track title
    pub track: String,
    /// Playable URL
    pub url: String,
}

/// Playlist parse errors
#[derive(Error, Debug)]
pub enum PlaylistParseError {
    /// The first line was not the expected header
    #[error("missing {M3U_HEADER} header")]
    MissingHeader,

    /// A display line did not carry the expected prefix
    #[error("malformed entry at line {0}")]
    MalformedEntry(usize),

    /// A display line had no URL line after it
    #[error("entry at line {0} has no URL line")]
    MissingUrl(usize),
}

/// Render candidates into an M3U playlist body
///
/// Only candidates with a resolved link contribute a record; relative
/// order is preserved. With no linked candidates the result is just the
/// header line.
pub fn render(candidates: &[TrackCandidate]) -> String {
    let mut out = String::from(M3U_HEADER);
    out.push('\n');

    for candidate in candidates {
        if let Some(link) = &candidate.link {
            out.push_str(EXTINF_PREFIX);
            out.push_str(&candidate.artist);
            out.push_str(" - ");
            out.push_str(&candidate.track);
            out.push('\n');
            out.push_str(link);
            out.push('\n');
        }
    }

    out
}

/// Parse an M3U playlist body back into its records
///
/// The display line splits into artist and track at the FIRST ` - `
/// separator; an artist name containing the separator will shift the
/// split, which matches how the display line was rendered.
pub fn parse(content: &str) -> Result<Vec<PlaylistEntry>, PlaylistParseError> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, line)) if line.trim() == M3U_HEADER => {}
        _ => return Err(PlaylistParseError::MissingHeader),
    }

    let mut entries = Vec::new();

    while let Some((line_no, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        let display = line
            .strip_prefix(EXTINF_PREFIX)
            .ok_or(PlaylistParseError::MalformedEntry(line_no + 1))?;

        let (artist, track) = match display.split_once(" - ") {
            Some((artist, track)) => (artist.to_string(), track.to_string()),
            None => (String::new(), display.to_string()),
        };

        let url = match lines.next() {
            Some((_, url)) if !url.trim().is_empty() => url.trim().to_string(),
            _ => return Err(PlaylistParseError::MissingUrl(line_no + 1)),
        };

        entries.push(PlaylistEntry { artist, track, url });
    }

    Ok(entries)
}
