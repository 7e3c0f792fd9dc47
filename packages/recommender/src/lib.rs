//! Mood-to-playlist recommendation pipeline for Moodtune
//!
//! This crate is the one shared pipeline component behind every Moodtune
//! front end (HTTP API, chat session, CLI): free-text mood -> emotion label
//! -> descriptive tags -> catalog candidates -> playable links -> playlist.
//!
//! The pipeline is strictly sequential request/response work: the per-tag
//! catalog loop and the per-candidate link loop run one awaited call at a
//! time, bounded by fixed caps, with no retries anywhere.
//!
//! Modules:
//! - [`emotion`] - language-model emotion classification
//! - [`tags`] - language-model tag generation
//! - [`pipeline`] - the recommendation orchestrator
//! - [`feedback`] - feedback-driven tag adjustment
//! - [`playlist`] - M3U playlist rendering and parsing
//! - [`session`] - the pure conversational state machine
//! - [`assistant`] - async chat-turn driver executing session effects

pub mod assistant;
pub mod emotion;
pub mod error;
pub mod feedback;
pub mod models;
pub mod pipeline;
pub mod playlist;
pub mod session;
pub mod tags;

pub use assistant::Assistant;
pub use emotion::{EmotionClassifier, UNKNOWN_EMOTION};
pub use error::{RecommendError, RecommendResult};
pub use feedback::{FeedbackAnalyzer, FeedbackContext};
pub use models::{
    EmotionDetection, FeedbackAnalysis, FeedbackOutcome, MoodAdjustment, Recommendations,
    TrackCandidate, UserProfile,
};
pub use pipeline::Recommender;
pub use session::{ChatTurn, Effect, Event, Role, Session, SessionState};
pub use tags::TagGenerator;
