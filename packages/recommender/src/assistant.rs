//! Async chat-turn driver
//!
//! Executes the effects the session state machine asks for (classifier
//! calls, token exchange, pipeline runs) and feeds the outcomes back in
//! until the turn settles. Both the HTTP chat endpoint and the CLI loop
//! sit on top of this.

use std::collections::VecDeque;

use tracing::instrument;

use crate::pipeline::Recommender;
use crate::session::{Effect, Event, Session};

/// Chat-turn driver over the shared pipeline
#[derive(Debug, Clone)]
pub struct Assistant {
    recommender: Recommender,
}

impl Assistant {
    /// Create a driver over an assembled pipeline
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }

    /// The underlying pipeline
    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Process one user message and return the assistant's replies
    ///
    /// Appends the user turn, then runs the state machine to quiescence:
    /// each effect is executed in order and its outcome event applied,
    /// which may queue further effects. Narration is returned in order
    /// and is also recorded in the session transcript.
    #[instrument(skip(self, session, text))]
    pub async fn handle_message(&self, session: &mut Session, text: &str) -> Vec<String> {
        session.push_user_turn(text);

        let mut replies = Vec::new();
        let mut queue: VecDeque<Effect> =
            session.apply(Event::UserMessage(text.to_string())).into();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Say(content) => replies.push(content),

                Effect::DetectEmotion { text } => {
                    let event = match self.recommender.classifier().detect(&text).await {
                        Ok(detection) => Event::EmotionDetected {
                            emotion: detection.emotion,
                            warning: detection.warning,
                        },
                        Err(e) => Event::EmotionFailed(e.to_string()),
                    };
                    queue.extend(session.apply(event));
                }

                Effect::ExchangeCode { code } => {
                    let event = match self.recommender.spotify().exchange_code(&code).await {
                        Ok(tokens) => Event::AuthSucceeded {
                            access_token: tokens.access_token,
                        },
                        Err(e) => Event::AuthFailed(e.to_string()),
                    };
                    queue.extend(session.apply(event));
                }

                Effect::RunPipeline { emotion } => {
                    let event = match session.access_token().map(str::to_string) {
                        Some(token) => match self.recommender.recommend(&token, &emotion).await {
                            Ok(result) => Event::PipelineFinished {
                                recommendations: result.recommendations,
                            },
                            Err(e) => Event::PipelineFailed(e.to_string()),
                        },
                        None => Event::PipelineFailed("not authenticated".to_string()),
                    };
                    queue.extend(session.apply(event));
                }
            }
        }

        replies
    }
}
