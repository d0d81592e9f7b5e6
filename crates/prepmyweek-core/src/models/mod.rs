// ABOUTME: Domain models for recipes, ingredients, prep selections, users, and stores
// ABOUTME: Wire-compatible with the JSON consumed by the web and mobile clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

/// Users, stores, and personalised store names
pub mod account;
/// `{success, data}` response envelope
pub mod api;
/// Prep slot, selected recipe, current and past prep types
pub mod prep;
/// Recipe, course, and ingredient line types
pub mod recipe;
/// Request bodies and query strings
pub mod requests;

pub use account::{CustomStoreNames, OwnedRecipe, Store, UserProfile};
pub use api::ApiResponse;
pub use prep::{CurrentPrep, PastPrep, PrepSlot, SelectedPrepRecipe};
pub use recipe::{
    Course, IngredientLine, Quantity, RecipeDetail, RecipeStatus, RecipeSummary,
    RecipeWithIngredients,
};
pub use requests::{
    FeedbackKind, FeedbackRequest, GroceryListRequest, LoginRequest, LoginResponse,
    NewIngredientLine, NewRecipe, PastPrepRequest, RecipeFilter, RecipeIdsRequest, RecipeSort,
    RegisterRequest, StoreRecipesQuery,
};
