//! Feedback analysis over the language model
//!
//! Turns free-text listening feedback into a structured adjustment: a
//! friendly reply, a mood shift direction, and replacement tags. The
//! model's JSON reply is treated as untrusted input and sanitized before
//! parsing.

use tracing::{debug, instrument};

use moodtune_ollama_client::{ChatMessage, OllamaClient};

use crate::error::{RecommendError, RecommendResult};
use crate::models::FeedbackAnalysis;
use crate::tags::MAX_TAGS;

const SYSTEM_PROMPT: &str = "You are a music recommendation assistant analyzing user feedback. \
     Respond with JSON containing: \
     - response: string (friendly reply) \
     - mood_adjustment: string (more_energetic|more_calm|no_change) \
     - new_tags: array (3-5 music tags based on feedback)";

/// Inputs for a feedback round
#[derive(Debug, Clone)]
pub struct FeedbackContext {
    /// The mood the current recommendations were keyed on
    pub current_mood: String,
    /// The track playing when feedback was given, if any
    pub current_track: Option<String>,
    /// The user's free-text feedback
    pub feedback: String,
    /// Tags behind the current recommendations
    pub current_tags: Vec<String>,
}

/// Feedback analyzer backed by the Ollama chat API
#[derive(Debug, Clone)]
pub struct FeedbackAnalyzer {
    llm: OllamaClient,
}

impl FeedbackAnalyzer {
    /// Create an analyzer over an existing LLM client
    pub fn new(llm: OllamaClient) -> Self {
        Self { llm }
    }

    /// Analyze feedback into a structured adjustment
    ///
    /// # Errors
    /// - `RecommendError::InvalidInput` - empty feedback text
    /// - `RecommendError::Llm` - the model call failed
    /// - `RecommendError::ModelReplyFormat` - the reply held no parseable
    ///   JSON object matching the contract
    #[instrument(skip(self, context))]
    pub async fn analyze(&self, context: FeedbackContext) -> RecommendResult<FeedbackAnalysis> {
        if context.feedback.trim().is_empty() {
            return Err(RecommendError::InvalidInput(
                "feedback text cannot be empty".to_string(),
            ));
        }

        let prompt = format!(
            "Analyze this music feedback and suggest adjustments:\n\
             Current mood: {}\n\
             Current track: {}\n\
             User feedback: {}\n\
             Previous tags: {}",
            context.current_mood,
            context.current_track.as_deref().unwrap_or("(none)"),
            context.feedback,
            context.current_tags.join(", "),
        );

        let reply = self
            .llm
            .chat(vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
            .await
            .map_err(|e| RecommendError::Llm(e.to_string()))?;

        let mut analysis = parse_analysis(&reply)?;

        // Same hygiene as generated tags: trimmed, non-empty, capped
        analysis.new_tags = analysis
            .new_tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(MAX_TAGS)
            .map(str::to_string)
            .collect();

        debug!(
            adjustment = ?analysis.mood_adjustment,
            tag_count = analysis.new_tags.len(),
            "Feedback analyzed"
        );

        Ok(analysis)
    }
}

/// Parse the model's reply into a `FeedbackAnalysis`
///
/// Strips code fences and extracts the outermost `{...}` before handing
/// the text to serde; anything that still fails to parse is an
/// upstream-format error.
fn parse_analysis(reply: &str) -> RecommendResult<FeedbackAnalysis> {
    let body = extract_json_object(reply).ok_or_else(|| {
        RecommendError::ModelReplyFormat("reply contains no JSON object".to_string())
    })?;

    serde_json::from_str(body).map_err(|e| RecommendError::ModelReplyFormat(e.to_string()))
}

/// Locate the outermost JSON object in a possibly fenced reply
fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}
