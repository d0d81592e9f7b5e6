// ABOUTME: Shared test helpers for the API integration tests
// ABOUTME: Builds an in-memory server and registers users, stores and recipes through the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;

use axum::http::StatusCode;
use axum::Router;
use axum_test::AxumTestRequest;
use prepmyweek::config::ServerConfig;
use prepmyweek::resources::ServerResources;
use prepmyweek::server::PrepServer;
use serde_json::{json, Value};
use std::sync::Arc;

/// A server over a fresh in-memory database
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let resources = ServerResources::connect(ServerConfig::for_testing())
            .await
            .expect("Failed to create test resources");
        let resources = Arc::new(resources);
        let router = PrepServer::new(resources.clone()).router();
        Self { resources, router }
    }

    /// Router clone for one request
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Register an account and return its token
    pub async fn register(&self, email: &str) -> String {
        AxumTestRequest::post("/api/users")
            .json(&json!({
                "email": email,
                "name": "Test Cook",
                "password": "password123",
            }))
            .send(self.app())
            .await
            .assert_status(StatusCode::CREATED);
        self.login(email, "password123").await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let body: Value = AxumTestRequest::post("/api/users/login")
            .json(&json!({ "email": email, "password": password }))
            .send(self.app())
            .await
            .assert_status(StatusCode::OK)
            .json();
        body["token"].as_str().expect("token").to_owned()
    }

    /// Register a moderator and return its token
    pub async fn register_admin(&self, email: &str) -> String {
        let token = self.register(email).await;
        let users = self.resources.database.users();
        let user = users.get_by_email(email).await.unwrap().unwrap();
        users.set_admin(user.id, true).await.unwrap();
        token
    }

    pub async fn create_store(&self, token: &str, name: &str) -> i64 {
        let body: Value = AxumTestRequest::post("/api/stores")
            .bearer(token)
            .json(&json!({ "name": name }))
            .send(self.app())
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        body["id"].as_i64().expect("store id")
    }

    /// Submit a recipe and return its id
    pub async fn create_recipe(&self, token: &str, recipe: &Value) -> i64 {
        let body: Value = AxumTestRequest::post("/api/recipes")
            .bearer(token)
            .json(recipe)
            .send(self.app())
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        body["data"]["id"].as_i64().expect("recipe id")
    }
}

/// A valid recipe body
pub fn recipe_json(title: &str, course: &str, store_ids: &[i64]) -> Value {
    json!({
        "title": title,
        "description": "Weeknight staple",
        "instructions": "Chop, cook, serve.",
        "prepTime": 10,
        "cookTime": 20,
        "course": course,
        "servings": 4,
        "storeIds": store_ids,
        "ingredients": [
            { "name": "Onion", "quantity": 1, "unit": "whole", "storeSection": "Produce" },
            { "name": "Milk", "quantity": "1 1/2", "unit": "cups", "storeSection": "Dairy" }
        ]
    })
}
