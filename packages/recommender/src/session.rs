//! The conversational session state machine
//!
//! One explicit tagged state enum, transitioned by a single pure function
//! `step(state, authenticated, event) -> (state, effects)` with no I/O
//! inside. Adapters execute the effects (classifier call, token exchange,
//! pipeline run) and feed the outcome back in as the next event.
//!
//! There is no terminal state: the conversation loops across mood cycles
//! indefinitely, and every failure path lands back in `WaitingForMood` so
//! the user can retry from the top.

use serde::Serialize;

use crate::models::TrackCandidate;

/// Greeting seeded into every new session's transcript
pub const GREETING: &str =
    "Hello! I'm your music recommendation assistant. How are you feeling today?";

const PROMPT_RECOMMENDATIONS: &str =
    "Would you like me to generate music recommendations based on your mood? (yes/no)";

const PROMPT_NEXT_MOOD: &str = "How are you feeling now?";

/// Who authored a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation transcript
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Conversational phase, with the per-phase payload it needs to resume
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the user to describe their mood
    WaitingForMood,
    /// Mood classified; waiting for a pasted Spotify authorization code
    WaitingForSpotifyAuth { emotion: String },
    /// Authenticated and classified; waiting for a yes/no
    ReadyForRecommendations { emotion: String },
}

/// An input to the state machine
#[derive(Debug, Clone)]
pub enum Event {
    /// The user typed a message
    UserMessage(String),
    /// The classifier produced a label (possibly the sentinel)
    EmotionDetected {
        emotion: String,
        warning: Option<String>,
    },
    /// The classifier call failed outright
    EmotionFailed(String),
    /// Token exchange succeeded
    AuthSucceeded { access_token: String },
    /// Token exchange failed
    AuthFailed(String),
    /// The recommendation pipeline finished
    PipelineFinished {
        recommendations: Vec<TrackCandidate>,
    },
    /// The recommendation pipeline failed at some stage
    PipelineFailed(String),
}

/// An action for the adapter to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append an assistant turn to the transcript and show it
    Say(String),
    /// Run the emotion classifier over the text
    DetectEmotion { text: String },
    /// Exchange the pasted authorization code for tokens
    ExchangeCode { code: String },
    /// Run the full recommendation pipeline for the emotion
    RunPipeline { emotion: String },
}

/// Whether user text counts as consent to run the pipeline
fn is_affirmative(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "yes" | "y" | "sure"
    )
}

/// The single transition function
///
/// Pure: no I/O, no clocks. Events that make no sense in the current
/// state are ignored (state unchanged, no effects).
pub fn step(
    state: SessionState,
    authenticated: bool,
    event: &Event,
) -> (SessionState, Vec<Effect>) {
    match (state, event) {
        (SessionState::WaitingForMood, Event::UserMessage(text)) => (
            SessionState::WaitingForMood,
            vec![
                Effect::Say("Analyzing your mood...".to_string()),
                Effect::DetectEmotion { text: text.clone() },
            ],
        ),

        (SessionState::WaitingForMood, Event::EmotionDetected { emotion, warning }) => {
            let mut effects = Vec::new();
            if let Some(warning) = warning {
                effects.push(Effect::Say(format!("Heads up: {}", warning)));
            }
            effects.push(Effect::Say(format!("I sense you're feeling {}.", emotion)));

            if authenticated {
                effects.push(Effect::Say(PROMPT_RECOMMENDATIONS.to_string()));
                (
                    SessionState::ReadyForRecommendations {
                        emotion: emotion.clone(),
                    },
                    effects,
                )
            } else {
                effects.push(Effect::Say(
                    "To give you personalized recommendations, I'll need your Spotify \
                     authorization code."
                        .to_string(),
                ));
                effects.push(Effect::Say(
                    "Please open the authorization link, approve access, then paste \
                     your auth code here."
                        .to_string(),
                ));
                (
                    SessionState::WaitingForSpotifyAuth {
                        emotion: emotion.clone(),
                    },
                    effects,
                )
            }
        }

        (SessionState::WaitingForMood, Event::EmotionFailed(message)) => (
            SessionState::WaitingForMood,
            vec![Effect::Say(format!(
                "Oops! Something went wrong: {}",
                message
            ))],
        ),

        (SessionState::WaitingForSpotifyAuth { emotion }, Event::UserMessage(code)) => (
            SessionState::WaitingForSpotifyAuth { emotion },
            vec![
                Effect::Say("Connecting to Spotify...".to_string()),
                Effect::ExchangeCode { code: code.clone() },
            ],
        ),

        (SessionState::WaitingForSpotifyAuth { emotion }, Event::AuthSucceeded { .. }) => (
            SessionState::ReadyForRecommendations { emotion },
            vec![
                Effect::Say(
                    "Successfully connected to Spotify! This connection will be remembered."
                        .to_string(),
                ),
                Effect::Say(PROMPT_RECOMMENDATIONS.to_string()),
            ],
        ),

        (SessionState::WaitingForSpotifyAuth { .. }, Event::AuthFailed(message)) => (
            SessionState::WaitingForMood,
            vec![Effect::Say(format!(
                "Oops! Something went wrong: {}",
                message
            ))],
        ),

        (SessionState::ReadyForRecommendations { emotion }, Event::UserMessage(text)) => {
            if is_affirmative(text) {
                (
                    SessionState::ReadyForRecommendations {
                        emotion: emotion.clone(),
                    },
                    vec![
                        Effect::Say("Generating personalized recommendations...".to_string()),
                        Effect::RunPipeline { emotion },
                    ],
                )
            } else {
                (
                    SessionState::WaitingForMood,
                    vec![
                        Effect::Say("Okay, let me know if you change your mind!".to_string()),
                        Effect::Say(PROMPT_NEXT_MOOD.to_string()),
                    ],
                )
            }
        }

        (SessionState::ReadyForRecommendations { .. }, Event::PipelineFinished { .. }) => (
            SessionState::WaitingForMood,
            vec![
                Effect::Say(
                    "Here's your personalized playlist based on your mood:".to_string(),
                ),
                Effect::Say(PROMPT_NEXT_MOOD.to_string()),
            ],
        ),

        (SessionState::ReadyForRecommendations { .. }, Event::PipelineFailed(message)) => (
            SessionState::WaitingForMood,
            vec![Effect::Say(format!(
                "Oops! Something went wrong: {}",
                message
            ))],
        ),

        // Events that make no sense in the current state are ignored
        (state, _) => (state, Vec::new()),
    }
}

/// A live chat session: state machine plus the session-scoped data
///
/// Lives in process memory for one chat session and resets on reconnect.
/// The transcript is append-only for the session lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    access_token: Option<String>,
    transcript: Vec<ChatTurn>,
    recommendations: Vec<TrackCandidate>,
}

impl Session {
    /// Create a fresh session, greeting already in the transcript
    pub fn new() -> Self {
        Self {
            state: SessionState::WaitingForMood,
            access_token: None,
            transcript: vec![ChatTurn {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
            recommendations: Vec::new(),
        }
    }

    /// Current conversational phase
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a token exchange has succeeded this session
    pub fn authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The delegated-auth access token, once obtained
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// The full conversation transcript
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// The most recent recommendation list
    pub fn recommendations(&self) -> &[TrackCandidate] {
        &self.recommendations
    }

    /// Record a user turn in the transcript
    pub fn push_user_turn(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatTurn {
            role: Role::User,
            content: text.into(),
        });
    }

    /// Apply an event: transition the state machine and record side data
    ///
    /// `Say` narration is appended to the transcript here; the returned
    /// effects still include it so adapters can render the turn.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        // Capture event payloads that outlive the transition
        match &event {
            Event::AuthSucceeded { access_token } => {
                self.access_token = Some(access_token.clone());
            }
            Event::PipelineFinished { recommendations } => {
                self.recommendations = recommendations.clone();
            }
            _ => {}
        }

        let (next, effects) = step(self.state.clone(), self.authenticated(), &event);
        self.state = next;

        for effect in &effects {
            if let Effect::Say(content) = effect {
                self.transcript.push(ChatTurn {
                    role: Role::Assistant,
                    content: content.clone(),
                });
            }
        }

        effects
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
