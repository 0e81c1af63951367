//! Integration test — router + relay + OpenAI client against a mock
//! assistant server.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use haven_api::{AppState, config::ApiConfig};
use haven_core::assistant::{OpenAiAssistant, OpenAiConfig};
use haven_core::relay::{ChatRelay, PollPolicy};
use haven_core::store::MemoryDocumentStore;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer, policy: PollPolicy) -> axum::Router {
    let mut config = OpenAiConfig::new("sk-test", "asst_test");
    config.base_url = server.uri();
    let assistant = Arc::new(OpenAiAssistant::new(config).expect("assistant"));

    router_with(ChatRelay::new(assistant, policy))
}

fn router_with(relay: ChatRelay) -> axum::Router {
    haven_api::router(AppState {
        relay,
        store: Arc::new(MemoryDocumentStore::new()),
        config: ApiConfig::default(),
    })
}

async fn post_chat(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("parse JSON"))
}

async fn mount_happy_path(server: &MockServer, run_status: &str) {
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "thread_1"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1", "role": "user", "created_at": 1,
            "content": [{"type": "text", "text": {"value": "q", "annotations": []}}]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "run_1", "status": "queued"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "run_1", "status": run_status})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "msg_2", "role": "assistant", "created_at": 2,
                 "content": [{"type": "text", "text": {
                     "value": "We are open daily from 8am to 8pm.", "annotations": []}}]},
                {"id": "msg_1", "role": "user", "created_at": 1,
                 "content": [{"type": "text", "text": {
                     "value": "What are your operating hours?", "annotations": []}}]}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn chat_returns_assistant_reply() {
    let server = MockServer::start().await;
    mount_happy_path(&server, "completed").await;

    let (status, json) = post_chat(
        app_for(&server, PollPolicy::default()),
        r#"{"message":"What are your operating hours?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "We are open daily from 8am to 8pm.");

    let requests = server.received_requests().await.expect("recording enabled");
    let retrieves = requests
        .iter()
        .filter(|r| r.url.path() == "/threads/thread_1/runs/run_1")
        .count();
    assert_eq!(retrieves, 1);
}

#[tokio::test]
async fn missing_message_is_400() {
    let server = MockServer::start().await;

    let (status, json) = post_chat(app_for(&server, PollPolicy::default()), "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Message is required"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_string_message_is_400() {
    let server = MockServer::start().await;
    let (status, json) = post_chat(app_for(&server, PollPolicy::default()), r#"{"message":""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Message is required");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let server = MockServer::start().await;
    let (status, json) = post_chat(app_for(&server, PollPolicy::default()), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn non_json_post_is_message_required() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "text/plain")
        .body(Body::from("hello"))
        .unwrap();

    let resp = app_for(&server, PollPolicy::default())
        .oneshot(req)
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({"error": "Message is required"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_or_non_string_message_gets_validation_text() {
    let server = MockServer::start().await;

    let (status, json) =
        post_chat(app_for(&server, PollPolicy::default()), r#"{"message":"   "}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Please enter a valid inquiry.");

    let (status, json) = post_chat(app_for(&server, PollPolicy::default()), r#"{"message":42}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Please enter a valid inquiry.");

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn overlong_message_gets_length_text() {
    let server = MockServer::start().await;
    let body = json!({ "message": "x".repeat(501) }).to_string();

    let (status, json) = post_chat(app_for(&server, PollPolicy::default()), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"],
        "Your inquiry is too long. Please keep it under 500 characters."
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn assistant_failure_is_200_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let (status, json) = post_chat(
        app_for(&server, PollPolicy::default()),
        r#"{"message":"What are your operating hours?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"response": "Sorry, there was an error processing your inquiry. Please try again later."})
    );
}

#[tokio::test]
async fn failed_run_is_200_apology() {
    let server = MockServer::start().await;
    mount_happy_path(&server, "failed").await;

    let (status, json) = post_chat(
        app_for(&server, PollPolicy::default()),
        r#"{"message":"hello"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"],
        "Sorry, there was an error processing your inquiry. Please try again later."
    );
}

#[tokio::test]
async fn run_that_never_completes_is_504() {
    let server = MockServer::start().await;
    mount_happy_path(&server, "in_progress").await;

    let policy = PollPolicy::new(Duration::from_millis(5), 3);
    let (status, json) = post_chat(app_for(&server, policy), r#"{"message":"hello"}"#).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        json["error"],
        "Sorry, the assistant is taking too long to respond. Please try again later."
    );

    let requests = server.received_requests().await.unwrap();
    let retrieves = requests
        .iter()
        .filter(|r| r.url.path() == "/threads/thread_1/runs/run_1")
        .count();
    assert_eq!(retrieves, 3);
}

#[tokio::test]
async fn health_is_ok() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app_for(&server, PollPolicy::default())
        .oneshot(req)
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({"status": "ok"}));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let server = MockServer::start().await;

    let resp = app_for(&server, PollPolicy::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .expect("request");

    let headers = resp.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
}
