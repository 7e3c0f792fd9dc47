//! Server-side state for the Moodtune API
//!
//! The pipeline itself lives in `moodtune-recommender`; this module holds
//! the process-memory stores the HTTP adapter needs around it.

pub mod playlist_store;
pub mod session_store;

pub use playlist_store::PlaylistStore;
pub use session_store::SessionStore;
