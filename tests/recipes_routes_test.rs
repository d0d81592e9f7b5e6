// ABOUTME: Integration tests for recipe browsing, submission, editing and deletion
// ABOUTME: Covers validation messages, ownership checks and metric conversion of the detail view
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
async fn test_member_submission_is_pending_and_hidden() {
    let app = TestApp::new().await;
    let token = app.register("member@example.com").await;

    let body: Value = AxumTestRequest::post("/api/recipes")
        .bearer(&token)
        .json(&recipe_json("Veggie Chili", "DINNER", &[]))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["success"], true);
    let recipe = &body["data"];
    assert_eq!(recipe["status"], "pending");
    assert_eq!(recipe["totalTime"], 30);
    assert_eq!(recipe["ingredientCount"], 2);
    assert_eq!(recipe["isVegetarian"], true);
    assert_eq!(recipe["ingredients"][0]["name"], "onion");
    assert_eq!(recipe["ingredients"][1]["quantity"], "1 1/2");

    let listing: Value = AxumTestRequest::get("/api/recipes")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listing["data"], json!([]));
}

#[tokio::test]
async fn test_admin_submission_is_approved_and_listed() {
    let app = TestApp::new().await;
    let token = app.register_admin("admin@example.com").await;

    let mut recipe = recipe_json("Chicken Tacos", "LUNCH", &[]);
    recipe["ingredients"][0]["name"] = json!("Chicken Thigh");
    let id = app.create_recipe(&token, &recipe).await;

    let listing: Value = AxumTestRequest::get("/api/recipes")
        .send(app.app())
        .await
        .json();
    assert_eq!(listing["data"][0]["id"], id);
    assert_eq!(listing["data"][0]["course"], "LUNCH");
    assert_eq!(listing["data"][0]["isVegetarian"], false);
}

#[tokio::test]
async fn test_submission_validation_messages() {
    let app = TestApp::new().await;
    let token = app.register("validate@example.com").await;

    let cases = [
        ("title", json!(""), "Title is required"),
        ("instructions", json!("  "), "Instructions is required"),
        ("servings", json!(0), "Servings must be at least 1"),
        ("course", json!("BRUNCH"), "Invalid course 'BRUNCH'"),
        ("ingredients", json!([]), "At least one ingredient is required"),
        (
            "cookTime",
            json!(-5),
            "Prep time and cook time must be non-negative",
        ),
    ];

    for (field, value, message) in cases {
        let mut recipe = recipe_json("Stew", "DINNER", &[]);
        recipe[field] = value;
        let body: Value = AxumTestRequest::post("/api/recipes")
            .bearer(&token)
            .json(&recipe)
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"], message, "field {field}");
    }
}

#[tokio::test]
async fn test_invalid_ingredient_name_and_unknown_store_rejected() {
    let app = TestApp::new().await;
    let token = app.register("names@example.com").await;

    let mut recipe = recipe_json("Stew", "DINNER", &[]);
    recipe["ingredients"][0]["name"] = json!("x");
    AxumTestRequest::post("/api/recipes")
        .bearer(&token)
        .json(&recipe)
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: Value = AxumTestRequest::post("/api/recipes")
        .bearer(&token)
        .json(&recipe_json("Stew", "DINNER", &[999]))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"], "Store 999 does not exist");
}

#[tokio::test]
async fn test_submission_requires_auth() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/api/recipes")
        .json(&recipe_json("Stew", "DINNER", &[]))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_detail_converts_to_metric_on_request() {
    let app = TestApp::new().await;
    let token = app.register("metric@example.com").await;
    let id = app
        .create_recipe(&token, &recipe_json("Pudding", "SNACK_SIDE", &[]))
        .await;

    let plain: Value = AxumTestRequest::get(&format!("/api/recipes/{id}"))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(plain["data"]["ingredients"][1]["unit"], "cups");

    let metric: Value = AxumTestRequest::get(&format!("/api/recipes/{id}?preferMetric=true"))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let milk = &metric["data"]["ingredients"][1];
    assert_eq!(milk["unit"], "ml");
    assert_eq!(milk["quantity"], 360.0);
    assert_eq!(metric["data"]["ingredients"][0]["unit"], "whole");

    AxumTestRequest::get("/api/recipes/4242")
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_owner_can_update_or_delete() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    let id = app
        .create_recipe(&owner, &recipe_json("Curry", "DINNER", &[]))
        .await;

    let denied: Value = AxumTestRequest::put(&format!("/api/recipes/{id}"))
        .bearer(&other)
        .json(&recipe_json("Stolen Curry", "DINNER", &[]))
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .json();
    assert_eq!(denied["error"], "Unauthorized to edit this recipe");

    AxumTestRequest::delete(&format!("/api/recipes/{id}"))
        .bearer(&other)
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    AxumTestRequest::put("/api/recipes/4242")
        .bearer(&owner)
        .json(&recipe_json("Ghost", "DINNER", &[]))
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_update_replaces_lines_and_keeps_status() {
    let app = TestApp::new().await;
    let admin = app.register_admin("mod@example.com").await;
    let owner = app.register("cook@example.com").await;
    let store = app.create_store(&admin, "Aldi").await;
    let id = app
        .create_recipe(&owner, &recipe_json("Curry", "DINNER", &[]))
        .await;

    let mut updated = recipe_json("Green Curry", "DINNER", &[store]);
    updated["ingredients"] = json!([{ "name": "Coconut Milk", "quantity": 1, "unit": "can" }]);
    let body: Value = AxumTestRequest::put(&format!("/api/recipes/{id}"))
        .bearer(&owner)
        .json(&updated)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let recipe = &body["data"];
    assert_eq!(recipe["title"], "Green Curry");
    assert_eq!(recipe["status"], "pending");
    assert_eq!(recipe["storeIds"], json!([store]));
    assert_eq!(recipe["ingredientCount"], 1);
    assert_eq!(recipe["ingredients"][0]["name"], "coconut milk");

    AxumTestRequest::delete(&format!("/api/recipes/{id}"))
        .bearer(&owner)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::get(&format!("/api/recipes/{id}"))
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
