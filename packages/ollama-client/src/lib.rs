//! Ollama API client for Moodtune
//!
//! This crate provides a client for the Ollama chat API, used for emotion
//! classification, tag generation and feedback analysis. Requests are
//! single-shot: each call issues exactly one upstream request.
//!
//! # Example
//!
//! ```rust,no_run
//! use moodtune_ollama_client::{ChatMessage, OllamaClient};
//! use moodtune_shared_config::OllamaConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new(&OllamaConfig::default())?;
//!
//! let reply = client
//!     .chat(vec![
//!         ChatMessage::system("You are an emotion detection expert."),
//!         ChatMessage::user("I feel great today!"),
//!     ])
//!     .await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::OllamaClient;
pub use error::{OllamaError, OllamaResult};
pub use models::{ChatMessage, ChatRole, GenerateOptions};
