// ABOUTME: Route handler building a grocery list from a set of recipes
// ABOUTME: Loads ingredient lines and delegates grouping and ordering to the planning crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::GroceryListRequest;
use prepmyweek_planning::{aggregate_with, AggregateOptions};
use std::sync::Arc;
use tracing::debug;

/// Grocery list routes handler
pub struct GroceryRoutes;

impl GroceryRoutes {
    /// Create the grocery list route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/grocery-list", post(Self::handle_grocery_list))
            .with_state(resources)
    }

    /// Handle POST /api/grocery-list
    ///
    /// Recipe ids are resolved in the order given; repeating an id counts
    /// its ingredients again.
    async fn handle_grocery_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<GroceryListRequest>,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers)?;
        let recipes = resources
            .database
            .recipes()
            .with_ingredients(&request.recipe_ids)
            .await?;

        let list = aggregate_with(
            &recipes,
            AggregateOptions {
                prefer_metric: request.prefer_metric,
            },
        );
        debug!(
            recipes = recipes.len(),
            entries = list.entry_count(),
            "Grocery list built"
        );
        Ok((StatusCode::OK, Json(list.into_response())).into_response())
    }
}
