//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint over a file-backed cache.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use filecache::{api::create_router, AppState, Cache, FileHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let handler = FileHandler::new(temp_dir.path()).expect("Failed to create handler");
    let state = AppState::new(Cache::new(Arc::new(handler), 300));
    (create_router(state), temp_dir)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SET / GET Endpoint Tests ==

#[tokio::test]
async fn test_set_and_get_structured_value() {
    let (app, _temp_dir) = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "user:1", "value": {"name": "ada", "roles": ["admin"]}, "ttl": 60})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, json) = send(&app, "GET", "/get/user:1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "user:1");
    assert_eq!(json["value"], json!({"name": "ada", "roles": ["admin"]}));
}

#[tokio::test]
async fn test_get_missing_returns_null() {
    let (app, _temp_dir) = create_test_app();

    let (status, json) = send(&app, "GET", "/get/nonexistent_key", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], Value::Null);
}

#[tokio::test]
async fn test_set_zero_ttl_is_expired() {
    let (app, _temp_dir) = create_test_app();

    send(&app, "PUT", "/set", Some(json!({"key": "k", "value": 1, "ttl": 0}))).await;

    let (_, json) = send(&app, "GET", "/has/k", None).await;
    assert_eq!(json["exists"], false);
}

#[tokio::test]
async fn test_set_empty_key_reports_failure() {
    let (app, _temp_dir) = create_test_app();

    let (status, json) = send(&app, "PUT", "/set", Some(json!({"key": "", "value": 1}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["faults"], 1);
}

#[tokio::test]
async fn test_set_malformed_body_rejected() {
    let (app, _temp_dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"key":"k"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == DELETE / HAS / CLEAR Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint() {
    let (app, _temp_dir) = create_test_app();
    send(&app, "PUT", "/set", Some(json!({"key": "gone", "value": "v"}))).await;

    let (_, json) = send(&app, "GET", "/has/gone", None).await;
    assert_eq!(json["exists"], true);

    let (status, json) = send(&app, "DELETE", "/del/gone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, json) = send(&app, "GET", "/has/gone", None).await;
    assert_eq!(json["exists"], false);

    // Deleting again is still a success
    let (_, json) = send(&app, "DELETE", "/del/gone", None).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_clear_endpoint() {
    let (app, _temp_dir) = create_test_app();
    send(&app, "PUT", "/set", Some(json!({"key": "a", "value": 1}))).await;
    send(&app, "PUT", "/set", Some(json!({"key": "b", "value": 2}))).await;

    let (status, json) = send(&app, "POST", "/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, json) = send(&app, "GET", "/get/a", None).await;
    assert_eq!(json["value"], Value::Null);
    let (_, json) = send(&app, "GET", "/get/b", None).await;
    assert_eq!(json["value"], Value::Null);
}

// == Bulk Endpoint Tests ==

#[tokio::test]
async fn test_set_multiple_and_get_multiple() {
    let (app, _temp_dir) = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/set-multiple",
        Some(json!({"entries": {"key1": "value1", "key3": [3]}, "ttl": 120})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, json) = send(
        &app,
        "POST",
        "/get-multiple",
        Some(json!({"keys": ["key1", "key2", "key3"], "default": "none"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["values"],
        json!({"key1": "value1", "key2": "none", "key3": [3]})
    );
}

#[tokio::test]
async fn test_delete_multiple() {
    let (app, _temp_dir) = create_test_app();
    send(
        &app,
        "PUT",
        "/set-multiple",
        Some(json!({"entries": {"a": 1, "b": 2, "c": 3}})),
    )
    .await;

    let (_, json) = send(
        &app,
        "POST",
        "/delete-multiple",
        Some(json!({"keys": ["a", "b", "missing"]})),
    )
    .await;
    assert_eq!(json["success"], true);

    let (_, json) = send(&app, "POST", "/get-multiple", Some(json!({"keys": ["a", "b", "c"]}))).await;
    assert_eq!(json["values"], json!({"a": null, "b": null, "c": 3}));
}

// == Stats / Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _temp_dir) = create_test_app();
    send(&app, "PUT", "/set", Some(json!({"key": "k", "value": 1}))).await;
    send(&app, "GET", "/get/k", None).await;
    send(&app, "GET", "/get/missing", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["faults"], 0);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _temp_dir) = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
