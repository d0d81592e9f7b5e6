// ABOUTME: Route handlers for the user's current prep and prep history
// ABOUTME: The current prep is overwritten on save; past preps are append-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::database::PastPrepRecord;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::{CurrentPrep, PastPrep, PastPrepRequest, RecipeIdsRequest};
use std::sync::Arc;
use tracing::info;

/// Prep routes handler
pub struct PrepRoutes;

impl PrepRoutes {
    /// Create all prep routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/current-prep",
                get(Self::handle_get_current).post(Self::handle_save_current),
            )
            .route(
                "/api/past-preps",
                get(Self::handle_list_past).post(Self::handle_create_past),
            )
            .route("/api/past-preps/:id", get(Self::handle_get_past))
            .with_state(resources)
    }

    async fn current_prep(resources: &ServerResources, user_id: i64) -> Result<CurrentPrep, AppError> {
        let Some(record) = resources.database.preps().current(user_id).await? else {
            return Ok(CurrentPrep::default());
        };
        let recipes = resources
            .database
            .recipes()
            .with_ingredients(&record.recipe_ids)
            .await?;
        Ok(CurrentPrep {
            recipes,
            updated_at: Some(record.updated_at),
        })
    }

    async fn past_prep(resources: &ServerResources, record: PastPrepRecord) -> Result<PastPrep, AppError> {
        let recipes = resources
            .database
            .recipes()
            .summaries(&record.recipe_ids)
            .await?;
        Ok(PastPrep {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            recipes,
        })
    }

    /// Handle GET /api/current-prep
    async fn handle_get_current(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let prep = Self::current_prep(&resources, auth.user_id).await?;
        Ok((StatusCode::OK, Json(prep)).into_response())
    }

    /// Handle POST /api/current-prep - Overwrite the working prep
    async fn handle_save_current(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<RecipeIdsRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .database
            .preps()
            .save_current(auth.user_id, &request.recipe_ids)
            .await?;
        let prep = Self::current_prep(&resources, auth.user_id).await?;
        Ok((StatusCode::OK, Json(prep)).into_response())
    }

    /// Handle GET /api/past-preps - History, newest first
    async fn handle_list_past(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let records = resources.database.preps().list_past(auth.user_id).await?;

        let mut preps = Vec::with_capacity(records.len());
        for record in records {
            preps.push(Self::past_prep(&resources, record).await?);
        }
        Ok((StatusCode::OK, Json(preps)).into_response())
    }

    /// Handle GET /api/past-preps/:id
    async fn handle_get_past(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let record = resources
            .database
            .preps()
            .get_past(auth.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Past prep"))?;
        let prep = Self::past_prep(&resources, record).await?;
        Ok((StatusCode::OK, Json(prep)).into_response())
    }

    /// Handle POST /api/past-preps - Finalize a prep into the history
    async fn handle_create_past(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<PastPrepRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("Name"));
        }
        if request.recipe_ids.is_empty() {
            return Err(AppError::invalid_input("At least one recipe is required"));
        }

        let record = resources
            .database
            .preps()
            .create_past(auth.user_id, name, &request.recipe_ids)
            .await?;
        info!(prep_id = record.id, user_id = auth.user_id, "Past prep saved");

        let prep = Self::past_prep(&resources, record).await?;
        Ok((StatusCode::CREATED, Json(prep)).into_response())
    }
}
