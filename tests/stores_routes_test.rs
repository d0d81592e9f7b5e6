// ABOUTME: Integration tests for store routes and paginated store recipe listings
// ABOUTME: Verifies filters, sort orders, search and page clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::{recipe_json, TestApp};
use serde_json::{json, Value};

async fn seeded_store(app: &TestApp) -> (String, i64) {
    let admin = app.register_admin("admin@example.com").await;
    let store = app.create_store(&admin, "Trader Joe's").await;

    let mut steak = recipe_json("Steak Night", "DINNER", &[store]);
    steak["cookTime"] = json!(45);
    steak["ingredients"] = json!([
        { "name": "Ribeye Steak", "quantity": 1, "unit": "lb", "storeSection": "Meat" },
        { "name": "Butter", "quantity": 2, "unit": "tbsp", "storeSection": "Dairy" },
        { "name": "Garlic", "quantity": 3, "unit": "cloves", "storeSection": "Produce" }
    ]);
    app.create_recipe(&admin, &steak).await;

    let mut salad = recipe_json("Lentil Salad", "LUNCH", &[store]);
    salad["cookTime"] = json!(5);
    app.create_recipe(&admin, &salad).await;

    let mut pasta = recipe_json("Pesto Pasta", "DINNER", &[store]);
    pasta["cookTime"] = json!(15);
    pasta["ingredients"] = json!([{ "name": "Penne", "quantity": 1, "unit": "lb" }]);
    app.create_recipe(&admin, &pasta).await;

    app.create_recipe(&admin, &recipe_json("Elsewhere Soup", "DINNER", &[]))
        .await;

    (admin, store)
}

fn titles(page: &Value) -> Vec<String> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn test_create_and_list_stores() {
    let app = TestApp::new().await;
    let token = app.register("cook@example.com").await;
    app.create_store(&token, "whole foods").await;
    app.create_store(&token, "Aldi").await;

    let stores: Value = AxumTestRequest::get("/api/stores")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stores[0]["name"], "Aldi");
    assert_eq!(stores[1]["name"], "whole foods");

    AxumTestRequest::post("/api/stores")
        .bearer(&token)
        .json(&json!({ "name": "  " }))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    AxumTestRequest::post("/api/stores")
        .json(&json!({ "name": "Costco" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_recipes_only_linked_and_approved() {
    let app = TestApp::new().await;
    let (_, store) = seeded_store(&app).await;
    let member = app.register("member@example.com").await;
    app.create_recipe(&member, &recipe_json("Pending Pie", "DINNER", &[store]))
        .await;

    let page: Value = AxumTestRequest::get(&format!("/api/stores/{store}/recipes"))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        titles(&page),
        vec!["Pesto Pasta", "Lentil Salad", "Steak Night"]
    );
    assert_eq!(
        page["pagination"],
        json!({ "page": 1, "limit": 20, "total": 3, "totalPages": 1 })
    );
}

#[tokio::test]
async fn test_store_recipe_filters_and_sorts() {
    let app = TestApp::new().await;
    let (_, store) = seeded_store(&app).await;
    let base = format!("/api/stores/{store}/recipes");

    let vegetarian: Value = AxumTestRequest::get(&format!("{base}?filter=vegetarian&sort=cookTime"))
        .send(app.app())
        .await
        .json();
    assert_eq!(titles(&vegetarian), vec!["Lentil Salad", "Pesto Pasta"]);

    let dinner: Value = AxumTestRequest::get(&format!("{base}?filter=dinner&sort=ingredients"))
        .send(app.app())
        .await
        .json();
    assert_eq!(titles(&dinner), vec!["Pesto Pasta", "Steak Night"]);

    let search: Value = AxumTestRequest::get(&format!("{base}?search=STEAK"))
        .send(app.app())
        .await
        .json();
    assert_eq!(titles(&search), vec!["Steak Night"]);

    AxumTestRequest::get(&format!("{base}?sort=spiciest"))
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_recipe_pagination_clamps_limit() {
    let app = TestApp::new().await;
    let (_, store) = seeded_store(&app).await;

    let page: Value = AxumTestRequest::get(&format!(
        "/api/stores/{store}/recipes?page=2&limit=2&sort=cookTime"
    ))
    .send(app.app())
    .await
    .json();
    assert_eq!(titles(&page), vec!["Steak Night"]);
    assert_eq!(page["pagination"]["totalPages"], 2);

    let clamped: Value = AxumTestRequest::get(&format!("/api/stores/{store}/recipes?limit=0"))
        .send(app.app())
        .await
        .json();
    assert_eq!(clamped["pagination"]["limit"], 1);
    assert_eq!(clamped["pagination"]["totalPages"], 3);

    AxumTestRequest::get("/api/stores/999/recipes")
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
