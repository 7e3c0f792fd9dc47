//! Emotion classification over the language model
//!
//! One chat call with a fixed instruction, parsed defensively: the model's
//! reply format is an untrusted, loosely-structured external contract.

use tracing::{debug, instrument, warn};

use moodtune_ollama_client::{ChatMessage, OllamaClient};

use crate::error::{RecommendError, RecommendResult};
use crate::models::EmotionDetection;

/// Sentinel label returned when classification degrades
pub const UNKNOWN_EMOTION: &str = "unknown";

/// Longest reply accepted as a label when the expected delimiter is absent
const MAX_LABEL_LENGTH: usize = 64;

const SYSTEM_PROMPT: &str =
    "You are an emotion detection expert. Respond ONLY with: emotion: [label]";

/// Emotion classifier backed by the Ollama chat API
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    llm: OllamaClient,
}

impl EmotionClassifier {
    /// Create a classifier over an existing LLM client
    pub fn new(llm: OllamaClient) -> Self {
        Self { llm }
    }

    /// Classify the emotion expressed by free-text mood input
    ///
    /// Total over non-empty input: any model or transport failure degrades
    /// to the `"unknown"` sentinel with a user-visible warning, and the
    /// returned label is always non-empty and lowercase.
    ///
    /// # Errors
    /// `RecommendError::InvalidInput` when the text is empty after trimming.
    #[instrument(skip(self, text))]
    pub async fn detect(&self, text: &str) -> RecommendResult<EmotionDetection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RecommendError::InvalidInput(
                "mood text cannot be empty".to_string(),
            ));
        }

        debug!(text_len = text.len(), "Detecting emotion");

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Detect the sentiment emotions with around maximum of 5 labels \
                 in this text: \"{}\"",
                text
            )),
        ];

        match self.llm.chat(messages).await {
            Ok(reply) => {
                let emotion = parse_emotion_label(&reply);
                debug!(emotion = %emotion, "Detected emotion");
                Ok(EmotionDetection {
                    emotion,
                    warning: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Emotion detection degraded to sentinel");
                Ok(EmotionDetection {
                    emotion: UNKNOWN_EMOTION.to_string(),
                    warning: Some(format!("emotion detection unavailable: {}", e)),
                })
            }
        }
    }
}

/// Extract the emotion label from a model reply
///
/// The expected shape is `emotion: <label>`; the label is everything after
/// the LAST colon, trimmed and lowercased. A reply with no colon is used
/// whole, unless it is empty, spans multiple lines, or exceeds
/// `MAX_LABEL_LENGTH` characters, in which case the sentinel is returned.
fn parse_emotion_label(reply: &str) -> String {
    let raw = match reply.rfind(':') {
        Some(idx) => &reply[idx + 1..],
        None => reply,
    };

    let label = raw.trim().to_lowercase();

    if label.is_empty() || label.lines().count() > 1 || label.len() > MAX_LABEL_LENGTH {
        return UNKNOWN_EMOTION.to_string();
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtune_shared_config::OllamaConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn classifier_for(server: &MockServer) -> EmotionClassifier {
        let config = OllamaConfig::with_url(server.uri());
        EmotionClassifier::new(OllamaClient::new(&config).unwrap())
    }

    async fn mock_reply(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": {"role": "assistant", "content": content},
                "done": true,
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_parse_expected_shape() {
        assert_eq!(parse_emotion_label("emotion: Joyful"), "joyful");
    }

    #[test]
    fn test_parse_takes_last_colon() {
        assert_eq!(
            parse_emotion_label("Sure! Here you go: emotion: Melancholy"),
            "melancholy"
        );
    }

    #[test]
    fn test_parse_no_colon_uses_whole_reply() {
        assert_eq!(parse_emotion_label("  Wistful "), "wistful");
    }

    #[test]
    fn test_parse_no_colon_multiline_degrades() {
        assert_eq!(
            parse_emotion_label("I think the user\nis feeling great"),
            UNKNOWN_EMOTION
        );
    }

    #[test]
    fn test_parse_no_colon_too_long_degrades() {
        let rambling = "a".repeat(MAX_LABEL_LENGTH + 1);
        assert_eq!(parse_emotion_label(&rambling), UNKNOWN_EMOTION);
    }

    #[test]
    fn test_parse_empty_after_colon_degrades() {
        assert_eq!(parse_emotion_label("emotion:"), UNKNOWN_EMOTION);
    }

    #[tokio::test]
    async fn test_detect_joyful_scenario() {
        let server = MockServer::start().await;
        mock_reply(&server, "emotion: joyful").await;

        let classifier = classifier_for(&server);
        let detection = classifier
            .detect("I feel happy and energetic!")
            .await
            .unwrap();

        assert_eq!(detection.emotion, "joyful");
        assert!(detection.warning.is_none());
    }

    #[tokio::test]
    async fn test_detect_rejects_empty_text() {
        let server = MockServer::start().await;
        let classifier = classifier_for(&server);

        let result = classifier.detect("   ").await;
        assert!(matches!(result, Err(RecommendError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_detect_degrades_to_unknown_on_model_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let classifier = classifier_for(&server);
        let detection = classifier.detect("terrible day").await.unwrap();

        assert_eq!(detection.emotion, UNKNOWN_EMOTION);
        assert!(detection.warning.is_some());
    }

    #[tokio::test]
    async fn test_detect_is_always_lowercase_and_non_empty() {
        let server = MockServer::start().await;
        mock_reply(&server, "EMOTION: ANXIOUS").await;

        let classifier = classifier_for(&server);
        let detection = classifier.detect("so much to do").await.unwrap();

        assert!(!detection.emotion.is_empty());
        assert_eq!(detection.emotion, detection.emotion.to_lowercase());
    }
}
