//! Drives the chat-completions client against a throwaway local endpoint.

use axum::{ extract::State, http::{ HeaderMap, StatusCode }, routing::post, Json, Router };
use serde_json::{ json, Value };
use std::sync::{ Arc, Mutex };
use std::time::Duration;
use traffix_assistant::llm::chat::{ new_client, ChatClient };
use traffix_assistant::llm::{ LlmConfig, LlmType };
use traffix_assistant::models::chat::{ HistoryEntry, Sender };
use traffix_assistant::router::{ degraded_failure_reply, IntentRouter, EMPTY_COMPLETION_REPLY };

#[derive(Clone, Copy)]
enum Mode {
    Answer,
    Empty,
    Unauthorized,
    Garbage,
    Slow,
}

#[derive(Clone)]
struct Stub {
    mode: Mode,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    stub.seen.lock().unwrap().push((auth, body));

    match stub.mode {
        Mode::Answer => (
            StatusCode::OK,
            json!({ "choices": [{ "message": { "role": "assistant", "content": "  Keep left.\n" } }] }).to_string(),
        ),
        Mode::Empty => (StatusCode::OK, json!({ "choices": [] }).to_string()),
        Mode::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "message": "Incorrect API key provided" } }).to_string(),
        ),
        Mode::Garbage => (StatusCode::OK, "<html>not json</html>".to_string()),
        Mode::Slow => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, json!({ "choices": [] }).to_string())
        }
    }
}

async fn spawn_stub(mode: Mode) -> (String, Stub) {
    let stub = Stub { mode, seen: Arc::new(Mutex::new(Vec::new())) };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), stub)
}

fn router_for(base_url: String, timeout: Duration) -> IntentRouter {
    let config = LlmConfig {
        llm_type: LlmType::OpenAI,
        api_key: Some("sk-test".into()),
        base_url: Some(base_url),
        ..LlmConfig::default()
    };
    let client: Arc<dyn ChatClient> = new_client(&config).unwrap();
    IntentRouter::new(Some(client)).with_timeout(timeout)
}

const UNMATCHED: &str = "what's the weather like";

#[tokio::test]
async fn completion_is_returned_trimmed_with_full_request() {
    let (url, stub) = spawn_stub(Mode::Answer).await;
    let router = router_for(url, Duration::from_secs(5));
    let history = vec![
        HistoryEntry { text: "Hello! I'm your AI traffic management assistant.".into(), sender: Sender::Ai },
        HistoryEntry { text: "thanks".into(), sender: Sender::User }
    ];

    let result = router.classify(UNMATCHED, &history).await;
    assert!(result.success);
    assert_eq!(result.message, "Keep left.");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "exactly one outbound call");
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 500);
    let roles: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["system", "assistant", "user", "user"]);
    assert_eq!(body["messages"][3]["content"], UNMATCHED);
}

#[tokio::test]
async fn empty_completion_uses_sorry_sentence() {
    let (url, _stub) = spawn_stub(Mode::Empty).await;
    let result = router_for(url, Duration::from_secs(5)).classify(UNMATCHED, &[]).await;
    assert_eq!(result.message, EMPTY_COMPLETION_REPLY);
}

#[tokio::test]
async fn api_error_message_is_surfaced_in_help_text() {
    let (url, _stub) = spawn_stub(Mode::Unauthorized).await;
    let result = router_for(url, Duration::from_secs(5)).classify(UNMATCHED, &[]).await;
    assert!(result.success);
    assert_eq!(result.message, degraded_failure_reply("Incorrect API key provided"));
}

#[tokio::test]
async fn malformed_body_degrades() {
    let (url, _stub) = spawn_stub(Mode::Garbage).await;
    let result = router_for(url, Duration::from_secs(5)).classify(UNMATCHED, &[]).await;
    assert!(result.success);
    assert!(result.message.contains("Error details: Malformed completion body"));
}

#[tokio::test]
async fn slow_endpoint_is_cut_off() {
    let (url, _stub) = spawn_stub(Mode::Slow).await;
    let router = router_for(url, Duration::from_millis(200));
    let result = router.classify(UNMATCHED, &[]).await;
    assert!(result.success);
    assert!(result.message.ends_with("Error details: Request timed out after 200ms"));
    assert_eq!(router.stats().degraded_timeout, 1);
}

#[tokio::test]
async fn unreachable_endpoint_degrades() {
    // bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = router_for(format!("http://{}", addr), Duration::from_secs(5))
        .classify(UNMATCHED, &[]).await;
    assert!(result.success);
    assert!(result.message.starts_with("I'm here to help with traffic management!"));
    assert!(result.message.contains("Error details: "));
}

#[tokio::test]
async fn static_rules_do_not_touch_the_endpoint() {
    let (url, stub) = spawn_stub(Mode::Answer).await;
    let router = router_for(url, Duration::from_secs(5));
    router.classify("fine for red light", &[]).await;
    router.classify("traffic rules", &[]).await;
    router.classify("generate report", &[]).await;
    assert!(stub.seen.lock().unwrap().is_empty());
}
