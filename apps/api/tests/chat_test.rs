//! Integration tests for the chat-turn endpoint
//!
//! Drives a whole conversation (mood, auth code, consent) through the
//! HTTP adapter with mocked upstreams.

use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moodtune_api::routes::{chat_router, ChatState};
use moodtune_api::SessionStore;
use moodtune_lastfm_client::LastfmClient;
use moodtune_ollama_client::OllamaClient;
use moodtune_recommender::{Assistant, Recommender};
use moodtune_shared_config::{OllamaConfig, SpotifyConfig};
use moodtune_spotify_client::SpotifyClient;
use moodtune_youtube_client::YoutubeClient;

struct ChatHarness {
    spotify: MockServer,
    lastfm: MockServer,
    youtube: MockServer,
    ollama: MockServer,
    app: Router,
}

impl ChatHarness {
    async fn start() -> Self {
        let spotify = MockServer::start().await;
        let lastfm = MockServer::start().await;
        let youtube = MockServer::start().await;
        let ollama = MockServer::start().await;

        let spotify_config = SpotifyConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
        };
        let recommender = Recommender::new(
            SpotifyClient::with_base_urls(&spotify_config, spotify.uri(), spotify.uri()),
            LastfmClient::with_base_url("k", lastfm.uri()),
            YoutubeClient::with_base_url("k", youtube.uri()),
            OllamaClient::new(&OllamaConfig::with_url(ollama.uri())).unwrap(),
        );

        let app = chat_router(ChatState::new(
            Arc::new(Assistant::new(recommender)),
            Arc::new(SessionStore::new()),
        ));

        Self {
            spotify,
            lastfm,
            youtube,
            ollama,
            app,
        }
    }

    async fn send(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

#[tokio::test]
async fn test_missing_message_is_400() {
    let harness = ChatHarness::start().await;
    let (status, json) = harness.send(serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn test_full_conversation_produces_recommendations() {
    let harness = ChatHarness::start().await;

    // The emotion reply is capped at one use so the tag-list mock mounted
    // later can take over the same endpoint.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"role": "assistant", "content": "emotion: joyful"},
            "done": true,
        })))
        .up_to_n_times(1)
        .mount(&harness.ollama)
        .await;

    // Turn 1: mood text
    let (status, json) = harness
        .send(serde_json::json!({"message": "I feel happy and energetic!"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let session_id = json["session_id"].as_str().unwrap().to_string();
    let replies: Vec<String> = json["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert!(replies.iter().any(|r| r.contains("feeling joyful")));
    assert!(replies.iter().any(|r| r.contains("authorization code")));

    // Spotify token exchange for turn 2
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-1",
        })))
        .mount(&harness.spotify)
        .await;

    // Turn 2: auth code
    let (status, json) = harness
        .send(serde_json::json!({"session_id": session_id, "message": "AQBx-code"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let replies: Vec<String> = json["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert!(replies.iter().any(|r| r.contains("Successfully connected")));
    assert!(replies.iter().any(|r| r.contains("(yes/no)")));

    // Pipeline upstreams for turn 3
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-1", "country": "GB",
        })))
        .mount(&harness.spotify)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top/artists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"name": "Portishead", "genres": ["trip hop"]}],
        })))
        .mount(&harness.spotify)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"role": "assistant", "content": "tag one, tag two"},
            "done": true,
        })))
        .mount(&harness.ollama)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {"track": [{"name": "Song A", "artist": {"name": "Artist A"}}]},
        })))
        .mount(&harness.lastfm)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": {"kind": "youtube#video", "videoId": "v1"},
                       "snippet": {"title": "hit"}}],
        })))
        .mount(&harness.youtube)
        .await;

    // Turn 3: consent
    let (status, json) = harness
        .send(serde_json::json!({"session_id": session_id, "message": "yes"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let replies: Vec<String> = json["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert!(replies.iter().any(|r| r.contains("personalized playlist")));

    let recommendations = json["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(
        recommendations[0]["link"],
        "https://music.youtube.com/watch?v=v1"
    );
}

#[tokio::test]
async fn test_decline_keeps_conversation_going() {
    let harness = ChatHarness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"role": "assistant", "content": "emotion: calm"},
            "done": true,
        })))
        .mount(&harness.ollama)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-1",
        })))
        .mount(&harness.spotify)
        .await;

    let (_, json) = harness
        .send(serde_json::json!({"message": "feeling mellow"}))
        .await;
    let session_id = json["session_id"].as_str().unwrap().to_string();

    harness
        .send(serde_json::json!({"session_id": session_id, "message": "a-code"}))
        .await;

    let (status, json) = harness
        .send(serde_json::json!({"session_id": session_id, "message": "no"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    let replies: Vec<String> = json["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert!(replies.iter().any(|r| r.contains("change your mind")));
    assert!(replies.iter().any(|r| r.contains("How are you feeling now?")));
}
