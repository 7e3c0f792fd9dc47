//! Tag generation over the language model
//!
//! Combines the detected emotion with the user's genres and country into
//! at most five short descriptive tags usable as catalog-search keys.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use moodtune_ollama_client::{ChatMessage, OllamaClient};

use crate::error::{RecommendError, RecommendResult};

/// Maximum number of tags kept from a single generation
pub const MAX_TAGS: usize = 5;

const SYSTEM_PROMPT: &str = "You are a music recommendation expert. \
     Respond ONLY with a comma-separated list of emotion-related tags.";

/// Tag generator backed by the Ollama chat API
#[derive(Debug, Clone)]
pub struct TagGenerator {
    llm: OllamaClient,
}

impl TagGenerator {
    /// Create a generator over an existing LLM client
    pub fn new(llm: OllamaClient) -> Self {
        Self { llm }
    }

    /// Generate up to five descriptive tags for an emotion/profile pair
    ///
    /// The result may legitimately be empty when the model does not
    /// comply with the comma-separated contract; callers treat an empty
    /// list as "no recommendations possible", never as a crash.
    ///
    /// # Errors
    /// `RecommendError::Llm` when the model call itself fails.
    #[instrument(skip(self, genres))]
    pub async fn generate(
        &self,
        emotion: &str,
        genres: &BTreeSet<String>,
        country: &str,
    ) -> RecommendResult<Vec<String>> {
        let genre_list = genres.iter().cloned().collect::<Vec<_>>().join(", ");

        let prompt = format!(
            "For the emotion \"{}\", and considering these genres: {} \
             and country: {}, generate 5 music tags.\n\
             Respond ONLY with comma-separated tags, for example: \
             upbeat indie pop, feel-good rock, summer dance, happy folk, energetic electronic",
            emotion, genre_list, country
        );

        let reply = self
            .llm
            .chat(vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
            .await
            .map_err(|e| RecommendError::Llm(e.to_string()))?;

        let tags = split_tags(&reply);

        debug!(tag_count = tags.len(), "Generated tags");

        Ok(tags)
    }
}

/// Split a model reply into clean tags: comma-separated, trimmed,
/// empties dropped, capped at `MAX_TAGS`
fn split_tags(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_TAGS)
        .map(str::to_string)
        .collect()
}
