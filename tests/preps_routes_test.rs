// ABOUTME: Integration tests for current prep, prep history and grocery list routes
// ABOUTME: Checks ordering, per-user scoping and aggregation through the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::{recipe_json, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn test_current_prep_empty_then_saved_in_order() {
    let app = TestApp::new().await;
    let token = app.register("prep@example.com").await;
    let first = app
        .create_recipe(&token, &recipe_json("Chili", "DINNER", &[]))
        .await;
    let second = app
        .create_recipe(&token, &recipe_json("Wraps", "LUNCH", &[]))
        .await;

    let empty: Value = AxumTestRequest::get("/api/current-prep")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(empty["recipes"], json!([]));
    assert!(empty["updatedAt"].is_null());

    let saved: Value = AxumTestRequest::post("/api/current-prep")
        .bearer(&token)
        .json(&json!({ "recipeIds": [second, first] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(saved["recipes"][0]["id"], second);
    assert_eq!(saved["recipes"][1]["id"], first);
    assert_eq!(saved["recipes"][1]["ingredients"][0]["name"], "onion");

    let overwritten: Value = AxumTestRequest::post("/api/current-prep")
        .bearer(&token)
        .json(&json!({ "recipeIds": [first] }))
        .send(app.app())
        .await
        .json();
    assert_eq!(overwritten["recipes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_past_preps_are_scoped_to_their_owner() {
    let app = TestApp::new().await;
    let token = app.register("history@example.com").await;
    let other = app.register("snoop@example.com").await;
    let recipe = app
        .create_recipe(&token, &recipe_json("Chili", "DINNER", &[]))
        .await;

    let created: Value = AxumTestRequest::post("/api/past-preps")
        .bearer(&token)
        .json(&json!({ "name": " Week 1 ", "recipeIds": [recipe] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["name"], "Week 1");
    assert_eq!(created["recipes"][0]["title"], "Chili");
    let prep_id = created["id"].as_i64().unwrap();

    AxumTestRequest::post("/api/past-preps")
        .bearer(&token)
        .json(&json!({ "name": "Week 2", "recipeIds": [recipe, recipe] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED);

    let history: Value = AxumTestRequest::get("/api/past-preps")
        .bearer(&token)
        .send(app.app())
        .await
        .json();
    assert_eq!(history[0]["name"], "Week 2");
    assert_eq!(history[0]["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(history[1]["name"], "Week 1");

    AxumTestRequest::get(&format!("/api/past-preps/{prep_id}"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::get(&format!("/api/past-preps/{prep_id}"))
        .bearer(&other)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_past_prep_validation() {
    let app = TestApp::new().await;
    let token = app.register("strict@example.com").await;

    let unnamed: Value = AxumTestRequest::post("/api/past-preps")
        .bearer(&token)
        .json(&json!({ "name": "", "recipeIds": [1] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(unnamed["error"], "Name is required");

    AxumTestRequest::post("/api/past-preps")
        .bearer(&token)
        .json(&json!({ "name": "Empty", "recipeIds": [] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grocery_list_merges_and_orders_sections() {
    let app = TestApp::new().await;
    let token = app.register("shopper@example.com").await;
    let recipe = app
        .create_recipe(&token, &recipe_json("Chowder", "DINNER", &[]))
        .await;

    let body: Value = AxumTestRequest::post("/api/grocery-list")
        .bearer(&token)
        .json(&json!({ "recipeIds": [recipe, recipe, 9999] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["sections"], json!(["Produce", "Dairy"]));
    let milk = &body["groceryList"]["Dairy"][0];
    assert_eq!(milk["name"], "milk");
    assert_eq!(milk["unit"], "cups");
    assert_eq!(milk["quantity"], 3.0);
    assert_eq!(body["groceryList"]["Produce"][0]["quantity"], 2.0);
}

#[tokio::test]
async fn test_grocery_list_in_metric() {
    let app = TestApp::new().await;
    let token = app.register("metric@example.com").await;
    let recipe = app
        .create_recipe(&token, &recipe_json("Chowder", "DINNER", &[]))
        .await;

    let body: Value = AxumTestRequest::post("/api/grocery-list")
        .bearer(&token)
        .json(&json!({ "recipeIds": [recipe, recipe], "preferMetric": true }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let milk = &body["groceryList"]["Dairy"][0];
    assert_eq!(milk["unit"], "ml");
    assert_eq!(milk["quantity"], 720.0);
}

#[tokio::test]
async fn test_prep_routes_require_auth() {
    let app = TestApp::new().await;
    for request in [
        AxumTestRequest::get("/api/current-prep"),
        AxumTestRequest::get("/api/past-preps"),
        AxumTestRequest::post("/api/grocery-list").json(&json!({ "recipeIds": [] })),
    ] {
        request
            .send(app.app())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
