use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::miro::test_helpers::{MockSource, raw_connector, raw_item};
use crate::routes::app;
use crate::state::test_helpers::test_app_state;

fn board_source() -> Arc<MockSource> {
    Arc::new(MockSource::new(
        vec![raw_item("a", "shape", "Alpha", 0.0, 0.0), raw_item("b", "sticky_note", "Beta", 10.0, 10.0)],
        vec![raw_connector("ab", "a", "b", "then")],
    ))
}

async fn post_json(state: AppState, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// analyze
// =============================================================================

#[tokio::test]
async fn analyze_full_board_default_command() {
    let state = test_app_state(board_source(), Some("tok"));
    let (status, body) = post_json(state, "/filter/miro/analyze", r#"{"board_id":"b1"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["command"], "full_board");
    assert_eq!(body["data"]["metadata"]["itemCount"], 2);
    assert!(body.get("text").is_none());
}

#[tokio::test]
async fn analyze_text_format_adds_rendering() {
    let state = test_app_state(board_source(), Some("tok"));
    let (_, body) = post_json(
        state,
        "/openwebui/filter/analyze",
        r#"{"board_id":"b1","command":"search","params":{"search_text":"beta"},"format":"text"}"#,
    )
    .await;

    assert_eq!(body["command"], "search");
    assert_eq!(body["data"]["resultCount"], 1);
    assert!(body["text"].as_str().unwrap().starts_with("Search Query: 'beta'"));
}

#[tokio::test]
async fn analyze_validation_failure_is_400() {
    let state = test_app_state(board_source(), Some("tok"));
    let (status, body) =
        post_json(state, "/filter/miro/analyze", r#"{"board_id":"b1","command":"connected_path","params":{}}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "E_VALIDATION");
    assert!(body["error"].as_str().unwrap().contains("start_item_id"));
}

#[tokio::test]
async fn analyze_malformed_body_is_400() {
    let state = test_app_state(board_source(), Some("tok"));
    let (status, body) = post_json(state, "/filter/miro/analyze", "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn analyze_missing_credential_is_500() {
    let source = board_source();
    let state = test_app_state(source.clone(), None);
    let (status, body) = post_json(state, "/filter/miro/analyze", r#"{"board_id":"b1"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "E_CONFIGURATION");
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn analyze_upstream_failure_is_502() {
    let source = Arc::new(MockSource::new(vec![], vec![]).failing_on_call(1, 503));
    let state = test_app_state(source, Some("tok"));
    let (status, body) =
        post_json(state, "/filter/miro/analyze", r#"{"board_id":"b1","command":"search","params":{"search_text":"x"}}"#)
            .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "E_UPSTREAM_STATUS");
}

// =============================================================================
// tools
// =============================================================================

#[tokio::test]
async fn tools_lists_three_commands() {
    let state = test_app_state(board_source(), None);
    let response = app(state)
        .oneshot(Request::builder().uri("/filter/miro/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let commands: Vec<&str> =
        body["tools"][0]["commands"].as_array().unwrap().iter().map(|c| c["command"].as_str().unwrap()).collect();
    assert_eq!(commands, vec!["full_board", "connected_path", "search"]);
}

// =============================================================================
// inlet
// =============================================================================

#[tokio::test]
async fn inlet_injects_board_data_before_last_message() {
    let state = test_app_state(board_source(), Some("tok"));
    let body = r#"{"model":"m","messages":[{"role":"user","content":"hi"},{"role":"user","content":"what is on board b1?"}]}"#;
    let (status, out) = post_json(state, "/filter/miro/inlet", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["model"], "m");
    let messages = out["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "system");
    let injected = messages[1]["content"].as_str().unwrap();
    assert!(injected.starts_with("[Miro Board Data]\nBoard: b1"));
    assert!(injected.contains("1. Alpha --[then]--> Beta"));
    assert_eq!(messages[2]["content"], "what is on board b1?\n\n✓ Miro data loaded");
}

#[tokio::test]
async fn inlet_without_board_reference_is_unchanged() {
    let state = test_app_state(board_source(), Some("tok"));
    let body = serde_json::json!({ "messages": [{ "role": "user", "content": "hello there" }] });
    let (_, out) = post_json(state, "/filter/miro/inlet", &body.to_string()).await;
    assert_eq!(out, body);
}

#[tokio::test]
async fn inlet_renders_failures_inline() {
    let state = test_app_state(board_source(), None);
    let body = r#"{"messages":[{"role":"user","content":"search board b1 for 'alpha'"}]}"#;
    let (status, out) = post_json(state, "/filter/miro/inlet", body).await;

    assert_eq!(status, StatusCode::OK);
    let injected = out["messages"][0]["content"].as_str().unwrap();
    assert!(injected.starts_with("[Miro Board Data]\nError: configuration error"));
}
