// ABOUTME: Request bodies and query strings accepted by the REST API
// ABOUTME: Shared by the server extractors and the typed API client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::recipe::{Course, Quantity};
use serde::{Deserialize, Serialize};

/// `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Region
    #[serde(default)]
    pub region: Option<String>,
    /// Preferred store name
    #[serde(default)]
    pub preferred_store: Option<String>,
}

/// `POST /api/users/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// `POST /api/users/login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
}

/// One ingredient line of a submitted recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredientLine {
    /// Ingredient name, normalized by the server
    pub name: String,
    /// Amount
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// Unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Store section
    #[serde(default)]
    pub store_section: Option<String>,
    /// Optional garnish or extra
    #[serde(default)]
    pub is_optional: bool,
    /// Preparation note
    #[serde(default)]
    pub preparation: Option<String>,
}

/// `POST /api/recipes` and `PUT /api/recipes/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Title
    #[serde(default)]
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Cooking instructions
    #[serde(default)]
    pub instructions: String,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: i64,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time: i64,
    /// Course, validated by the server
    #[serde(default)]
    pub course: String,
    /// Servings the recipe yields
    #[serde(default)]
    pub servings: i64,
    /// Optional image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Stores to link
    #[serde(default)]
    pub store_ids: Vec<i64>,
    /// Ingredient lines in entry order
    #[serde(default)]
    pub ingredients: Vec<NewIngredientLine>,
}

/// `{recipeIds}` body used by current prep and moderation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIdsRequest {
    /// Recipe ids, in order
    #[serde(default)]
    pub recipe_ids: Vec<i64>,
}

/// `POST /api/past-preps`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPrepRequest {
    /// Name of the prep
    #[serde(default)]
    pub name: String,
    /// Recipe ids
    #[serde(default)]
    pub recipe_ids: Vec<i64>,
}

/// `POST /api/grocery-list`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListRequest {
    /// Recipe ids; duplicates count twice
    #[serde(default)]
    pub recipe_ids: Vec<i64>,
    /// Convert US units to metric
    #[serde(default)]
    pub prefer_metric: bool,
}

/// Feedback category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Something is broken
    Bug,
    /// Something is missing
    Feature,
    /// Anything else
    Other,
}

impl FeedbackKind {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Other => "other",
        }
    }
}

/// `POST /api/feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Category
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// Free-form message
    #[serde(default)]
    pub message: String,
}

/// Store recipe listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeFilter {
    /// No filtering
    #[default]
    All,
    /// Vegetarian recipes only
    Vegetarian,
    /// Dinner course only
    Dinner,
    /// Lunch course only
    Lunch,
}

impl RecipeFilter {
    /// Course this filter restricts to, if any
    #[must_use]
    pub const fn course(&self) -> Option<Course> {
        match self {
            Self::Dinner => Some(Course::Dinner),
            Self::Lunch => Some(Course::Lunch),
            Self::All | Self::Vegetarian => None,
        }
    }
}

/// Store recipe listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipeSort {
    /// Most recently created first
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Fewest ingredients first
    #[serde(rename = "ingredients")]
    Ingredients,
    /// Shortest cook time first
    #[serde(rename = "cookTime")]
    CookTime,
}

/// `GET /api/stores/:id/recipes` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreRecipesQuery {
    /// 1-based page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size, clamped to 1..=100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Case-insensitive title search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Filter
    #[serde(default)]
    pub filter: RecipeFilter,
    /// Order
    #[serde(default)]
    pub sort: RecipeSort,
}
