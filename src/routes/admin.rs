// ABOUTME: Route handlers for recipe moderation
// ABOUTME: Lists pending submissions and approves or rejects them; moderators only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! Admin routes
//!
//! The moderator flag is read from the database on every request, so a
//! revoked moderator loses access before their token expires.

use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::{ApiResponse, RecipeIdsRequest, RecipeStatus};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Admin routes handler
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all moderation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/admin/recipes/pending", get(Self::handle_pending))
            .route(
                "/api/admin/recipes/approve-multiple",
                put(Self::handle_approve_multiple),
            )
            .route("/api/admin/recipes/:id/reject", put(Self::handle_reject))
            .with_state(resources)
    }

    /// Handle GET /api/admin/recipes/pending - Oldest submissions first
    async fn handle_pending(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.require_admin(&headers).await?;
        let recipes = resources.database.recipes().list_pending().await?;
        Ok((StatusCode::OK, Json(ApiResponse::ok(recipes))).into_response())
    }

    /// Handle PUT /api/admin/recipes/approve-multiple
    async fn handle_approve_multiple(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<RecipeIdsRequest>,
    ) -> Result<Response, AppError> {
        let admin = resources.require_admin(&headers).await?;
        if request.recipe_ids.is_empty() {
            return Err(AppError::invalid_input("At least one recipe id is required"));
        }

        let approved = resources
            .database
            .recipes()
            .set_status(&request.recipe_ids, RecipeStatus::Approved)
            .await?;
        info!(admin_id = admin.id, approved, "Recipes approved");
        Ok((StatusCode::OK, Json(json!({ "approved": approved }))).into_response())
    }

    /// Handle PUT /api/admin/recipes/:id/reject
    async fn handle_reject(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let admin = resources.require_admin(&headers).await?;
        let changed = resources
            .database
            .recipes()
            .set_status(&[id], RecipeStatus::Rejected)
            .await?;
        if changed == 0 {
            return Err(AppError::not_found("Recipe"));
        }
        info!(admin_id = admin.id, recipe_id = id, "Recipe rejected");
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Recipe rejected", "id": id })),
        )
            .into_response())
    }
}
