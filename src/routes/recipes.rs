// ABOUTME: Route handlers for browsing, submitting, editing and deleting recipes
// ABOUTME: Responses use the {success, data} envelope; writes are limited to the recipe owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! Recipe routes
//!
//! Listing and detail are public. Submissions start as `pending` unless the
//! submitter is a moderator, in which case they are approved immediately.

use crate::database::RecipeInput;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::{ApiResponse, NewRecipe, Quantity, RecipeDetail, RecipeStatus};
use prepmyweek_planning::units::convert_to_metric;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Query string of `GET /api/recipes/:id`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailQuery {
    /// Convert ingredient quantities to metric
    #[serde(default)]
    pub prefer_metric: bool,
}

/// Rewrite every numeric ingredient quantity with a unit into metric
pub fn convert_detail_to_metric(detail: &mut RecipeDetail) {
    for line in &mut detail.recipe.ingredients {
        let (Some(amount), Some(unit)) = (
            line.quantity.as_ref().and_then(Quantity::as_f64),
            line.unit.as_deref(),
        ) else {
            continue;
        };
        let (amount, unit) = convert_to_metric(amount, unit);
        line.quantity = Some(Quantity::Number(amount));
        line.unit = Some(unit);
    }
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn load_detail(resources: &ServerResources, id: i64) -> Result<RecipeDetail, AppError> {
        resources
            .database
            .recipes()
            .detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))
    }

    /// Fail with 403 unless `user_id` owns the recipe; a missing recipe is also 403
    async fn require_owner(
        resources: &ServerResources,
        recipe_id: i64,
        user_id: i64,
        action: &str,
    ) -> Result<(), AppError> {
        let owner = resources.database.recipes().owner(recipe_id).await?;
        if owner.flatten() == Some(user_id) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "Unauthorized to {action} this recipe"
            )))
        }
    }

    /// Handle GET /api/recipes - Approved recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let recipes = resources.database.recipes().list_approved().await?;
        Ok((StatusCode::OK, Json(ApiResponse::ok(recipes))).into_response())
    }

    /// Handle GET /api/recipes/:id - Recipe detail
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Query(query): Query<RecipeDetailQuery>,
    ) -> Result<Response, AppError> {
        let mut detail = Self::load_detail(&resources, id).await?;
        if query.prefer_metric {
            convert_detail_to_metric(&mut detail);
        }
        Ok((StatusCode::OK, Json(ApiResponse::ok(detail))).into_response())
    }

    /// Handle POST /api/recipes - Submit a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let input = RecipeInput::try_from(request)?;

        let is_admin = resources
            .database
            .users()
            .get_by_id(auth.user_id)
            .await?
            .is_some_and(|user| user.is_admin);
        let status = if is_admin {
            RecipeStatus::Approved
        } else {
            RecipeStatus::Pending
        };

        let id = resources
            .database
            .recipes()
            .create(auth.user_id, &input, status)
            .await?;
        info!(recipe_id = id, user_id = auth.user_id, status = status.as_str(), "Recipe created");

        let detail = Self::load_detail(&resources, id).await?;
        Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))).into_response())
    }

    /// Handle PUT /api/recipes/:id - Replace an owned recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        Self::require_owner(&resources, id, auth.user_id, "edit").await?;
        let input = RecipeInput::try_from(request)?;

        if !resources.database.recipes().update(id, &input).await? {
            return Err(AppError::not_found("Recipe"));
        }
        info!(recipe_id = id, "Recipe updated");

        let detail = Self::load_detail(&resources, id).await?;
        Ok((StatusCode::OK, Json(ApiResponse::ok(detail))).into_response())
    }

    /// Handle DELETE /api/recipes/:id - Delete an owned recipe
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        Self::require_owner(&resources, id, auth.user_id, "delete").await?;

        resources.database.recipes().delete(id).await?;
        info!(recipe_id = id, "Recipe deleted");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepmyweek_core::models::{
        Course, IngredientLine, RecipeSummary, RecipeWithIngredients,
    };

    fn line(quantity: Option<Quantity>, unit: Option<&str>) -> IngredientLine {
        IngredientLine {
            ingredient_id: 1,
            name: "milk".to_owned(),
            quantity,
            unit: unit.map(str::to_owned),
            store_section: None,
            is_optional: false,
            preparation: None,
        }
    }

    fn detail(ingredients: Vec<IngredientLine>) -> RecipeDetail {
        RecipeDetail {
            recipe: RecipeWithIngredients {
                summary: RecipeSummary {
                    id: 1,
                    title: "Pancakes".to_owned(),
                    course: Course::Breakfast,
                    total_time: 20,
                    servings: 2,
                    ingredient_count: 1,
                    is_vegetarian: true,
                    image_url: None,
                },
                ingredients,
            },
            description: None,
            instructions: "Mix and fry".to_owned(),
            prep_time: 5,
            cook_time: 15,
            status: RecipeStatus::Approved,
            user_id: None,
            store_ids: Vec::new(),
        }
    }

    #[test]
    fn test_metric_conversion_rewrites_numeric_lines_only() {
        let mut recipe = detail(vec![
            line(Some(Quantity::Text("2".to_owned())), Some("cups")),
            line(Some(Quantity::Text("a pinch".to_owned())), Some("tsp")),
            line(Some(Quantity::Number(3.0)), None),
        ]);

        convert_detail_to_metric(&mut recipe);
        let lines = &recipe.recipe.ingredients;

        assert_eq!(lines[0].quantity, Some(Quantity::Number(480.0)));
        assert_eq!(lines[0].unit.as_deref(), Some("ml"));
        assert_eq!(lines[1].quantity, Some(Quantity::Text("a pinch".to_owned())));
        assert_eq!(lines[1].unit.as_deref(), Some("tsp"));
        assert_eq!(lines[2].quantity, Some(Quantity::Number(3.0)));
    }
}
