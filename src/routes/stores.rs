// ABOUTME: Route handlers for grocery stores and their recipe listings
// ABOUTME: Store recipe listings are filtered, sorted and paginated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::StoreRecipesQuery;
use prepmyweek_core::pagination::PageParams;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// `POST /api/stores`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Store routes handler
pub struct StoreRoutes;

impl StoreRoutes {
    /// Create all store routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/stores",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/stores/:id/recipes", get(Self::handle_recipes))
            .with_state(resources)
    }

    /// Handle GET /api/stores
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let stores = resources.database.stores().list().await?;
        Ok((StatusCode::OK, Json(stores)).into_response())
    }

    /// Handle POST /api/stores - Add a store
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateStoreRequest>,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers)?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("Name"));
        }
        let logo_url = request
            .logo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        let store = resources.database.stores().create(name, logo_url).await?;
        info!(store_id = store.id, "Store created");
        Ok((StatusCode::CREATED, Json(store)).into_response())
    }

    /// Handle GET /api/stores/:id/recipes - One page of the store's recipes
    async fn handle_recipes(
        State(resources): State<Arc<ServerResources>>,
        Path(store_id): Path<i64>,
        Query(query): Query<StoreRecipesQuery>,
    ) -> Result<Response, AppError> {
        if resources.database.stores().get(store_id).await?.is_none() {
            return Err(AppError::not_found("Store"));
        }

        let params = PageParams::from_query(query.page, query.limit);
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let page = resources
            .database
            .recipes()
            .list_by_store(store_id, query.filter, query.sort, search, params)
            .await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }
}
