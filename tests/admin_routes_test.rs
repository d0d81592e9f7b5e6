// ABOUTME: Integration tests for recipe moderation and feedback submission
// ABOUTME: Moderator rights are granted directly in the database, as the server's --grant-admin flag does
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::{recipe_json, TestApp};
use prepmyweek_core::models::FeedbackKind;
use serde_json::{json, Value};

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = TestApp::new().await;
    let token = app.register("member@example.com").await;

    let body: Value = AxumTestRequest::get("/api/admin/recipes/pending")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .json();
    assert_eq!(body["code"], "PERMISSION_DENIED");

    AxumTestRequest::put("/api/admin/recipes/approve-multiple")
        .json(&json!({ "recipeIds": [1] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pending_queue_approve_and_reject() {
    let app = TestApp::new().await;
    let member = app.register("member@example.com").await;
    let admin = app.register_admin("admin@example.com").await;
    let first = app
        .create_recipe(&member, &recipe_json("First", "DINNER", &[]))
        .await;
    let second = app
        .create_recipe(&member, &recipe_json("Second", "LUNCH", &[]))
        .await;
    let third = app
        .create_recipe(&member, &recipe_json("Third", "LUNCH", &[]))
        .await;

    let pending: Value = AxumTestRequest::get("/api/admin/recipes/pending")
        .bearer(&admin)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let ids: Vec<i64> = pending["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
    assert_eq!(pending["data"][0]["ingredientCount"], 2);

    let approved: Value = AxumTestRequest::put("/api/admin/recipes/approve-multiple")
        .bearer(&admin)
        .json(&json!({ "recipeIds": [first, second, second] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(approved["approved"], 2);

    AxumTestRequest::put(&format!("/api/admin/recipes/{third}/reject"))
        .bearer(&admin)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::put("/api/admin/recipes/9999/reject")
        .bearer(&admin)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listing: Value = AxumTestRequest::get("/api/recipes")
        .send(app.app())
        .await
        .json();
    assert_eq!(listing["data"].as_array().unwrap().len(), 2);

    let rejected: Value = AxumTestRequest::get(&format!("/api/recipes/{third}"))
        .send(app.app())
        .await
        .json();
    assert_eq!(rejected["data"]["status"], "rejected");
}

#[tokio::test]
async fn test_revoked_admin_loses_access_with_live_token() {
    let app = TestApp::new().await;
    let token = app.register_admin("former@example.com").await;
    let users = app.resources.database.users();
    let user = users
        .get_by_email("former@example.com")
        .await
        .unwrap()
        .unwrap();
    users.set_admin(user.id, false).await.unwrap();

    AxumTestRequest::get("/api/admin/recipes/pending")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_feedback_is_stored() {
    let app = TestApp::new().await;
    let token = app.register("feedback@example.com").await;

    AxumTestRequest::post("/api/feedback")
        .bearer(&token)
        .json(&json!({ "type": "bug", "message": "Grocery list forgot the eggs" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED);

    let blank: Value = AxumTestRequest::post("/api/feedback")
        .bearer(&token)
        .json(&json!({ "type": "feature", "message": "   " }))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(blank["error"], "Message is required");

    let feedback = app.resources.database.feedback();
    assert_eq!(feedback.count(FeedbackKind::Bug).await.unwrap(), 1);
    assert_eq!(feedback.count(FeedbackKind::Feature).await.unwrap(), 0);
}
