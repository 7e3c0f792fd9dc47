//! Domain types shared across the recommendation pipeline

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A user's listening profile, fetched fresh per request and never cached
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    /// Spotify user id
    pub user_id: String,
    /// ISO-ish country code, `"US"` when the profile omits it
    pub country: String,
    /// Genres implied by the user's top artists; empty when the
    /// top-artists read fails
    pub genres: BTreeSet<String>,
    /// Names of the user's top artists
    pub top_artists: Vec<String>,
}

/// A candidate track produced by catalog search
///
/// `link` stays `None` until link resolution succeeds for this candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackCandidate {
    /// Track title
    pub track: String,
    /// Artist name
    pub artist: String,
    /// The tag whose search produced this candidate
    pub tag: String,
    /// Playable video link, when resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The result of a full recommendation run
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    /// Candidate tracks, in catalog order; some may be link-less
    pub recommendations: Vec<TrackCandidate>,
    /// The emotion the run was keyed on
    pub emotion: String,
    /// Genres from the profile used for tag generation
    pub genres: Vec<String>,
    /// Country from the profile used for tag generation
    pub country: String,
}

/// Result of emotion classification
///
/// The label is always non-empty and lowercase; failures degrade to the
/// `"unknown"` sentinel with the warning carried alongside.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionDetection {
    /// Lowercase emotion label
    pub emotion: String,
    /// Non-fatal, user-visible warning from a degraded classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Direction the user's mood should shift, per feedback analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodAdjustment {
    MoreEnergetic,
    MoreCalm,
    NoChange,
}

/// Structured reply from the feedback-analysis model call
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackAnalysis {
    /// Friendly reply to show the user
    pub response: String,
    /// Mood shift direction
    pub mood_adjustment: MoodAdjustment,
    /// Replacement tags (3-5 expected; sanitized to at most 5)
    pub new_tags: Vec<String>,
}

/// Outcome of a feedback round: the model's reply plus regenerated
/// recommendations
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackOutcome {
    /// Friendly reply to show the user
    pub bot_response: String,
    /// Mood shift direction
    pub mood_adjustment: MoodAdjustment,
    /// Recommendations regenerated from the adjusted tags
    pub recommendations: Vec<TrackCandidate>,
}
