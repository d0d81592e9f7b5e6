// ABOUTME: Integration tests for health endpoints and the HTTP middleware stack
// ABOUTME: Covers request-id generation and propagation, CORS preflight and unknown routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::TestApp;
use serde_json::Value;

#[tokio::test]
async fn test_health_and_ready() {
    let app = TestApp::new().await;

    let health: Value = AxumTestRequest::get("/health")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
    assert!(health["timestamp"].is_string());

    let ready: Value = AxumTestRequest::get("/ready")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let app = TestApp::new().await;

    let generated = AxumTestRequest::get("/health").send(app.app()).await;
    assert!(generated
        .header("x-request-id")
        .is_some_and(|id| id.starts_with("req_")));

    let supplied = AxumTestRequest::get("/health")
        .header("x-request-id", "client-123")
        .send(app.app())
        .await;
    assert_eq!(supplied.header("x-request-id"), Some("client-123"));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_by_default() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::options("/api/recipes")
        .header("origin", "https://prepmyweek.app")
        .header("access-control-request-method", "POST")
        .send(app.app())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;
    AxumTestRequest::get("/api/nowhere")
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
