//! Integration tests for the recommendation endpoints
//!
//! Upstream services are mocked with wiremock; the full HTTP surface is
//! exercised through the router with oneshot requests.

use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moodtune_api::routes::{
    emotion_router, recommendation_router, EmotionState, RecommendationState,
};
use moodtune_lastfm_client::LastfmClient;
use moodtune_ollama_client::OllamaClient;
use moodtune_recommender::Recommender;
use moodtune_shared_config::{OllamaConfig, SpotifyConfig};
use moodtune_spotify_client::SpotifyClient;
use moodtune_youtube_client::YoutubeClient;

struct Upstreams {
    spotify: MockServer,
    lastfm: MockServer,
    youtube: MockServer,
    ollama: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            spotify: MockServer::start().await,
            lastfm: MockServer::start().await,
            youtube: MockServer::start().await,
            ollama: MockServer::start().await,
        }
    }

    fn recommender(&self) -> Arc<Recommender> {
        let spotify_config = SpotifyConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://example.com/callback".to_string(),
        };
        Arc::new(Recommender::new(
            SpotifyClient::with_base_urls(&spotify_config, self.spotify.uri(), self.spotify.uri()),
            LastfmClient::with_base_url("k", self.lastfm.uri()),
            YoutubeClient::with_base_url("k", self.youtube.uri()),
            OllamaClient::new(&OllamaConfig::with_url(self.ollama.uri())).unwrap(),
        ))
    }

    fn app(&self) -> Router {
        let recommender = self.recommender();
        Router::new()
            .merge(emotion_router(EmotionState::new(recommender.clone())))
            .merge(recommendation_router(RecommendationState::new(recommender)))
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mock_chat_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"role": "assistant", "content": content},
            "done": true,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_detect_emotion_endpoint() {
    let upstreams = Upstreams::start().await;
    mock_chat_reply(&upstreams.ollama, "emotion: joyful").await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/detect_emotion",
            serde_json::json!({"text": "I feel happy and energetic!"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["emotion"], "joyful");
    assert!(json.get("warning").is_none());
}

#[tokio::test]
async fn test_detect_emotion_missing_text_is_400() {
    let upstreams = Upstreams::start().await;

    let response = upstreams
        .app()
        .oneshot(post_json("/detect_emotion", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn test_recommendations_propagate_upstream_401() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"status": 401, "message": "The access token expired"},
        })))
        .mount(&upstreams.spotify)
        .await;

    // Tag generation must never run when the profile read fails
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstreams.ollama)
        .await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/recommendations",
            serde_json::json!({"access_token": "stale", "emotion": "joyful"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    // The zero-call expectation on the model server is verified on drop.
}

#[tokio::test]
async fn test_recommendations_full_run() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-1", "country": "GB",
        })))
        .mount(&upstreams.spotify)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top/artists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"name": "Portishead", "genres": ["trip hop"]}],
        })))
        .mount(&upstreams.spotify)
        .await;

    mock_chat_reply(&upstreams.ollama, "tag one, tag two, tag three").await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {"track": [
                {"name": "Song A", "artist": {"name": "Artist A"}},
                {"name": "Song B", "artist": {"name": "Artist B"}},
            ]},
        })))
        .mount(&upstreams.lastfm)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": {"kind": "youtube#video", "videoId": "v1"},
                       "snippet": {"title": "hit"}}],
        })))
        .mount(&upstreams.youtube)
        .await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/recommendations",
            serde_json::json!({"access_token": "tok", "emotion": "joyful"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    assert_eq!(json["emotion"], "joyful");
    assert_eq!(json["country"], "GB");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 6);
    assert_eq!(
        json["recommendations"][0]["link"],
        "https://music.youtube.com/watch?v=v1"
    );
}

#[tokio::test]
async fn test_recommendations_no_tracks_is_404() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-1",
        })))
        .mount(&upstreams.spotify)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/top/artists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
        })))
        .mount(&upstreams.spotify)
        .await;

    mock_chat_reply(&upstreams.ollama, "obscure tag").await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {"track": []},
        })))
        .mount(&upstreams.lastfm)
        .await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/recommendations",
            serde_json::json!({"access_token": "tok", "emotion": "numb"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["code"], "NO_TRACKS_FOUND");
}

#[tokio::test]
async fn test_feedback_regenerates_recommendations() {
    let upstreams = Upstreams::start().await;

    let analysis = r#"{"response": "Lifting things up!",
                       "mood_adjustment": "more_energetic",
                       "new_tags": ["upbeat pop", "dance"]}"#;
    mock_chat_reply(&upstreams.ollama, analysis).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {"track": [{"name": "S", "artist": {"name": "A"}}]},
        })))
        .mount(&upstreams.lastfm)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": {"kind": "youtube#video", "videoId": "v2"},
                       "snippet": {"title": "hit"}}],
        })))
        .mount(&upstreams.youtube)
        .await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/feedback",
            serde_json::json!({
                "current_mood": "melancholy",
                "current_track": "Teardrop - Massive Attack",
                "feedback": "too gloomy, pick me up",
                "current_tags": ["trip hop"],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    assert_eq!(json["bot_response"], "Lifting things up!");
    assert_eq!(json["mood_adjustment"], "more_energetic");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_feedback_missing_fields_is_400() {
    let upstreams = Upstreams::start().await;

    let response = upstreams
        .app()
        .oneshot(post_json(
            "/feedback",
            serde_json::json!({"current_mood": "calm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
