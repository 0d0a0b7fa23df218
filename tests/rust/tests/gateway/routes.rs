//! Route tests against the axum router with mock transports behind it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use mcphub_core::HubConfig;
use mcphub_gateway::{router, AppState};
use tests::ManagerTestHarness;

fn app(harness: &ManagerTestHarness) -> axum::Router {
    let config = HubConfig::from_json(
        r#"{"mcpServers": {"fs": {"command": "mock-server"}}}"#,
    )
    .unwrap();
    router(AppState::new(Arc::clone(&harness.manager), Arc::new(config)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn status_starts_empty() {
    let harness = ManagerTestHarness::new();

    let response = app(&harness).oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalServers"], 0);
}

#[tokio::test]
async fn register_duplicate_returns_the_error_envelope() {
    let harness = ManagerTestHarness::new();
    harness.factory.serve_tools("fs", &["read_file"]);

    let response = app(&harness)
        .oneshot(post("/register", json!({ "serverName": "fs" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["serverId"], "fs");

    let response = app(&harness)
        .oneshot(post("/register", json!({ "serverName": "fs" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Server fs is already registered");
}

#[tokio::test]
async fn call_tool_on_unknown_server_is_a_structured_error() {
    let harness = ManagerTestHarness::new();

    let response = app(&harness)
        .oneshot(post(
            "/call-tool",
            json!({ "serverName": "ghost", "toolName": "read_file", "args": {} }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Server ghost not found"));
}

#[tokio::test]
async fn call_tool_round_trips_through_the_mock_server() {
    let harness = ManagerTestHarness::new();
    harness.factory.serve_tools("fs", &["read_file"]);
    app(&harness)
        .oneshot(post("/register", json!({ "serverName": "fs" })))
        .await
        .unwrap();

    let response = app(&harness)
        .oneshot(post(
            "/call-tool",
            json!({ "serverName": "fs", "toolName": "read_file", "args": { "path": "/tmp" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["tool"], "read_file");
    assert_eq!(body["server"], "fs");
}

#[tokio::test]
async fn list_tools_route_returns_the_live_list() {
    let harness = ManagerTestHarness::new();
    harness.factory.serve_tools("fs", &["read_file", "list_dir"]);
    app(&harness)
        .oneshot(post("/register", json!({ "serverName": "fs" })))
        .await
        .unwrap();

    let response = app(&harness).oneshot(get("/list-tools/fs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    let names: Vec<&str> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["read_file", "list_dir"]);
}

#[tokio::test]
async fn disconnect_route_mirrors_manager_semantics() {
    let harness = ManagerTestHarness::new();
    harness.factory.serve_tools("fs", &[]);
    app(&harness)
        .oneshot(post("/register", json!({ "serverName": "fs" })))
        .await
        .unwrap();

    let response = app(&harness)
        .oneshot(post("/disconnect", json!({ "serverName": "fs" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&harness)
        .oneshot(post("/disconnect", json!({ "serverName": "fs" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
