use axum::body::{ to_bytes, Body };
use axum::http::{ Request, StatusCode };
use serde_json::{ json, Value };
use std::sync::Arc;
use tower::ServiceExt;
use traffix_assistant::router::{ IntentRouter, DEGRADED_UNCONFIGURED };
use traffix_assistant::server::api::build_router;

fn app() -> axum::Router {
    build_router(Arc::new(IntentRouter::new(None)))
}

async fn call(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = call(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn chat_answers_fine_queries() {
    let (status, body) = call(
        app(),
        post_json("/api/chat", json!({ "message": "What's the fine for speeding?" }))
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Here are the fine amounts for the detected violation(s):\n"));
    assert!(message.contains("Speeding Violation: ₹2,000"));
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn chat_accepts_history_and_degrades_offline() {
    let (status, body) = call(
        app(),
        post_json(
            "/api/chat",
            json!({
                "message": "what's the weather like",
                "history": [
                    { "text": "Hello! I'm your AI traffic management assistant.", "sender": "ai" },
                    { "text": "ok", "sender": "user" }
                ]
            })
        )
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], DEGRADED_UNCONFIGURED);
}

#[tokio::test]
async fn chat_carries_redirect_action() {
    let (_, body) = call(app(), post_json("/api/chat", json!({ "message": "Generate report" }))).await;
    assert_eq!(body["action"], json!({ "type": "redirect", "target": "/report-generator" }));
}

#[tokio::test]
async fn explanation_found_and_missing() {
    let (status, body) = call(app(), get("/api/violations/dui/explanation")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["legal_reference"], "Section 185, Motor Vehicles Act, 1988");

    let (status, body) = call(app(), get("/api/violations/jaywalking/explanation")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "No explanation found for this violation." }));
}

#[tokio::test]
async fn violations_catalog_filters() {
    let (status, body) = call(app(), get("/api/violations?category=non-moving")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["parking", "seatbelt"]);

    let (_, body) = call(app(), get("/api/violations?q=red&category=all")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["category"], "moving");

    let (status, body) = call(app(), get("/api/violations?category=parking")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn fines_table_is_listed() {
    let (status, body) = call(app(), get("/api/fines")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 18);
    assert_eq!(entries[0]["label"], "Driving without licence");
    assert_eq!(entries[0]["amount"], 5000);
}

#[tokio::test]
async fn stats_count_routes() {
    let router = Arc::new(IntentRouter::new(None));
    let app = build_router(router.clone());
    call(app.clone(), post_json("/api/chat", json!({ "message": "hello" }))).await;
    call(app.clone(), post_json("/api/chat", json!({ "message": "fine for nothing known" }))).await;

    let (status, body) = call(app, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["canned"], 1);
    assert_eq!(body["fine_not_found"], 1);
    assert_eq!(router.stats().canned, 1);
}
