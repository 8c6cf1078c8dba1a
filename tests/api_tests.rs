use chat_relay::routes::{ALLOW_HEADERS, create_router};
use chat_relay::services::provider::{CompletionProvider, Prompt, ProviderError};
use chat_relay::state::AppState;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::util::ServiceExt;

struct StubProvider {
    reply: Result<&'static str, &'static str>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text), calls: AtomicUsize::new(0) })
    }

    fn failing(msg: &'static str) -> Arc<Self> {
        Arc::new(Self { reply: Err(msg), calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(str::to_string)
            .map_err(|m| ProviderError::Network(m.to_string()))
    }
}

fn app(provider: Arc<StubProvider>) -> Router {
    create_router().with_state(AppState::shared(provider))
}

async fn call(app: Router, method: &str, body: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes.to_vec())
}

fn assert_json_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["content-type"], "application/json");
}

#[tokio::test]
async fn hello_returns_stubbed_reply() {
    let provider = StubProvider::replying("Hi there!");
    let (status, headers, body) = call(app(provider.clone()), "POST", r#"{"message":"Hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_json_cors(&headers);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "reply": "Hi there!" }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_or_empty_message_is_bad_request() {
    for payload in [r#"{}"#, r#"{"message":""}"#] {
        let provider = StubProvider::replying("unused");
        let (status, headers, body) = call(app(provider.clone()), "POST", payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_json_cors(&headers);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Message is required" }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0, "no provider call for {payload}");
    }
}

#[tokio::test]
async fn provider_failure_message_is_passed_through() {
    let (status, headers, body) =
        call(app(StubProvider::failing("rate limited")), "POST", r#"{"message":"Hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_cors(&headers);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "rate limited" }));
}

#[tokio::test]
async fn empty_provider_reply_is_server_error() {
    let (status, headers, body) = call(app(StubProvider::replying("")), "POST", r#"{"message":"Hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_cors(&headers);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("reply").is_none());
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn preflight_ignores_body() {
    let provider = StubProvider::replying("unused");
    let (status, headers, body) = call(app(provider.clone()), "OPTIONS", "definitely not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
    let allowed: Vec<String> = headers["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .split(',')
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    for name in ALLOW_HEADERS {
        assert!(allowed.contains(&name.as_str().to_string()), "{} missing from {allowed:?}", name.as_str());
    }
    assert_eq!(allowed.len(), ALLOW_HEADERS.len());
    assert!(body.is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, headers, body) = call(app(StubProvider::replying("unused")), "POST", "{oops").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_cors(&headers);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn other_methods_are_rejected_with_cors() {
    let (status, headers, body) = call(app(StubProvider::replying("unused")), "GET", "").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_json_cors(&headers);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn any_path_is_served() {
    let response = app(StubProvider::replying("ok"))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/functions/v1/chat")
                .body(Body::from(r#"{"message":"ping"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn every_outcome_has_exactly_one_field() {
    let cases = [
        (StubProvider::replying("Sure."), r#"{"message":"What is Rust?"}"#),
        (StubProvider::failing("boom"), r#"{"message":"What is Rust?"}"#),
        (StubProvider::replying("unused"), r#"{"message":""}"#),
        (StubProvider::replying(""), r#"{"message":"What is Rust?"}"#),
    ];
    for (provider, payload) in cases {
        let (status, _, body) = call(app(provider), "POST", payload).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        if status == StatusCode::OK {
            assert!(!obj["reply"].as_str().unwrap().is_empty());
        } else {
            assert!(!obj["error"].as_str().unwrap().is_empty());
        }
    }
}
