//! The recommendation pipeline orchestrator
//!
//! One shared component drives every front end: profile -> tags -> catalog
//! search -> link resolution. Each stage is a bounded, sequential loop of
//! single-shot upstream calls.

use tracing::{debug, info, instrument, warn};

use moodtune_lastfm_client::LastfmClient;
use moodtune_ollama_client::OllamaClient;
use moodtune_spotify_client::{SpotifyClient, SpotifyError};
use moodtune_youtube_client::YoutubeClient;

use crate::emotion::EmotionClassifier;
use crate::error::{RecommendError, RecommendResult};
use crate::feedback::{FeedbackAnalyzer, FeedbackContext};
use crate::models::{FeedbackOutcome, Recommendations, TrackCandidate, UserProfile};
use crate::tags::TagGenerator;

/// How many generated tags are actually searched (bounds request volume)
pub const MAX_SEARCH_TAGS: usize = 3;

/// Top tracks requested per tag
pub const TRACKS_PER_TAG: u32 = 5;

/// How many candidates get a link-resolution attempt (bounds latency)
pub const LINK_RESOLVE_CAP: usize = 10;

/// Top artists considered for the genre profile
pub const TOP_ARTISTS_LIMIT: u32 = 5;

/// Video results requested per link-resolution query
const VIDEO_RESULTS_PER_QUERY: u32 = 5;

/// The shared mood-to-playlist pipeline
#[derive(Debug, Clone)]
pub struct Recommender {
    spotify: SpotifyClient,
    lastfm: LastfmClient,
    youtube: YoutubeClient,
    classifier: EmotionClassifier,
    tags: TagGenerator,
    feedback: FeedbackAnalyzer,
}

impl Recommender {
    /// Assemble the pipeline from its upstream clients
    pub fn new(
        spotify: SpotifyClient,
        lastfm: LastfmClient,
        youtube: YoutubeClient,
        llm: OllamaClient,
    ) -> Self {
        Self {
            spotify,
            lastfm,
            youtube,
            classifier: EmotionClassifier::new(llm.clone()),
            tags: TagGenerator::new(llm.clone()),
            feedback: FeedbackAnalyzer::new(llm),
        }
    }

    /// The emotion classifier used by this pipeline
    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    /// The Spotify client used by this pipeline
    pub fn spotify(&self) -> &SpotifyClient {
        &self.spotify
    }

    /// Fetch the user's listening profile
    ///
    /// The profile read is fatal on failure and carries the upstream
    /// status; the top-artists read degrades to an empty genre set.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_profile(&self, access_token: &str) -> RecommendResult<UserProfile> {
        let profile = self
            .spotify
            .get_profile(access_token)
            .await
            .map_err(|e| match e {
                SpotifyError::Api { status, message } => RecommendError::Profile { status, message },
                other => RecommendError::ProfileTransport(other.to_string()),
            })?;

        let country = profile.country.unwrap_or_else(|| "US".to_string());

        let (genres, top_artists) = match self
            .spotify
            .get_top_artists(access_token, TOP_ARTISTS_LIMIT)
            .await
        {
            Ok(artists) => {
                let genres = artists
                    .iter()
                    .flat_map(|a| a.genres.iter().cloned())
                    .collect();
                let names = artists.into_iter().map(|a| a.name).collect();
                (genres, names)
            }
            Err(e) => {
                warn!(error = %e, "Top-artists read failed, continuing without genres");
                (Default::default(), Vec::new())
            }
        };

        Ok(UserProfile {
            user_id: profile.id,
            country,
            genres,
            top_artists,
        })
    }

    /// Run the full recommendation pipeline for a detected emotion
    ///
    /// profile -> tags -> catalog search -> link resolution. Empty-result
    /// stages fail distinctly (`NoTags`, `NoTracksFound`) before any
    /// further upstream call is made.
    #[instrument(skip(self, access_token))]
    pub async fn recommend(
        &self,
        access_token: &str,
        emotion: &str,
    ) -> RecommendResult<Recommendations> {
        let emotion = emotion.trim();
        if emotion.is_empty() {
            return Err(RecommendError::InvalidInput(
                "emotion cannot be empty".to_string(),
            ));
        }

        info!(emotion = %emotion, "Starting recommendation run");

        let profile = self.fetch_profile(access_token).await?;

        let tags = self
            .tags
            .generate(emotion, &profile.genres, &profile.country)
            .await?;
        if tags.is_empty() {
            return Err(RecommendError::NoTags);
        }

        let mut candidates = self.search_catalog(&tags).await;
        if candidates.is_empty() {
            return Err(RecommendError::NoTracksFound);
        }

        self.resolve_links(&mut candidates).await;

        info!(
            candidate_count = candidates.len(),
            linked_count = candidates.iter().filter(|c| c.link.is_some()).count(),
            "Recommendation run complete"
        );

        Ok(Recommendations {
            recommendations: candidates,
            emotion: emotion.to_string(),
            genres: profile.genres.iter().cloned().collect(),
            country: profile.country,
        })
    }

    /// Regenerate recommendations from an explicit tag list
    ///
    /// Used by the feedback round; same caps and failure semantics as the
    /// main run, minus profile and tag generation.
    #[instrument(skip(self))]
    pub async fn recommend_by_tags(
        &self,
        tags: &[String],
    ) -> RecommendResult<Vec<TrackCandidate>> {
        if tags.is_empty() {
            return Err(RecommendError::NoTags);
        }

        let mut candidates = self.search_catalog(tags).await;
        if candidates.is_empty() {
            return Err(RecommendError::NoTracksFound);
        }

        self.resolve_links(&mut candidates).await;

        Ok(candidates)
    }

    /// Analyze user feedback and regenerate recommendations from the
    /// adjusted tags
    #[instrument(skip(self, context))]
    pub async fn process_feedback(
        &self,
        context: FeedbackContext,
    ) -> RecommendResult<FeedbackOutcome> {
        let analysis = self.feedback.analyze(context).await?;

        let recommendations = self.recommend_by_tags(&analysis.new_tags).await?;

        Ok(FeedbackOutcome {
            bot_response: analysis.response,
            mood_adjustment: analysis.mood_adjustment,
            recommendations,
        })
    }

    /// Query the catalog for each of the first `MAX_SEARCH_TAGS` tags
    ///
    /// A tag whose search fails or matches nothing contributes nothing;
    /// the same (track, artist) pair reached through two tags yields two
    /// candidates.
    async fn search_catalog(&self, tags: &[String]) -> Vec<TrackCandidate> {
        let mut candidates = Vec::new();

        for tag in tags.iter().take(MAX_SEARCH_TAGS) {
            match self.lastfm.get_tag_top_tracks(tag, Some(TRACKS_PER_TAG)).await {
                Ok(tracks) => {
                    debug!(tag = %tag, count = tracks.len(), "Catalog search hit");
                    candidates.extend(tracks.into_iter().map(|t| TrackCandidate {
                        track: t.name,
                        artist: t.artist,
                        tag: tag.clone(),
                        link: None,
                    }));
                }
                Err(e) => {
                    warn!(tag = %tag, error = %e, "Catalog search failed for tag");
                }
            }
        }

        candidates
    }

    /// Attach playable links to the first `LINK_RESOLVE_CAP` candidates
    ///
    /// The first video-kind result of a `"<track> <artist>"` search wins.
    /// A failed lookup leaves that candidate link-less and the batch
    /// continues; candidates past the cap are returned link-less.
    async fn resolve_links(&self, candidates: &mut [TrackCandidate]) {
        for candidate in candidates.iter_mut().take(LINK_RESOLVE_CAP) {
            let query = format!("{} {}", candidate.track, candidate.artist);

            match self.youtube.search_videos(&query, VIDEO_RESULTS_PER_QUERY).await {
                Ok(results) => {
                    candidate.link = results.iter().find_map(|r| r.watch_url());
                }
                Err(e) => {
                    warn!(
                        track = %candidate.track,
                        artist = %candidate.artist,
                        error = %e,
                        "Link resolution failed for candidate"
                    );
                }
            }
        }
    }
}
