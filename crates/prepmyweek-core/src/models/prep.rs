// ABOUTME: Prep selection models shared by the planner and the API surface
// ABOUTME: Defines PrepSlot, SelectedPrepRecipe, CurrentPrep, and PastPrep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::recipe::{Course, RecipeSummary, RecipeWithIngredients};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slot a recipe was added under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepSlot {
    /// Counted against the dinner target
    Dinner,
    /// Counted against the lunch target
    Lunch,
    /// Selected for the prep but not counted by the progress tracker
    General,
}

impl PrepSlot {
    /// Slot a recipe lands in when added from a listing
    #[must_use]
    pub const fn for_course(course: Course) -> Self {
        match course {
            Course::Dinner => Self::Dinner,
            Course::Lunch => Self::Lunch,
            Course::SnackSide | Course::Breakfast => Self::General,
        }
    }
}

/// A recipe the user has tentatively chosen for the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPrepRecipe {
    /// The recipe snapshot
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    /// Slot it was added under
    pub slot: PrepSlot,
}

impl SelectedPrepRecipe {
    /// Pair a recipe with the slot it was added under
    #[must_use]
    pub const fn new(recipe: RecipeSummary, slot: PrepSlot) -> Self {
        Self { recipe, slot }
    }

    /// Recipe id
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.recipe.id
    }

    /// Servings the recipe yields
    #[must_use]
    pub const fn servings(&self) -> u32 {
        self.recipe.servings
    }
}

/// The user's working prep, overwritten on every save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPrep {
    /// Saved recipes with their ingredient lines, in save order
    pub recipes: Vec<RecipeWithIngredients>,
    /// Last save, `None` when nothing was ever saved
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A named, finalized prep kept in the user's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPrep {
    /// Past prep id
    pub id: i64,
    /// Name given when the prep was finalized
    pub name: String,
    /// When it was saved
    pub created_at: DateTime<Utc>,
    /// Recipes in the prep
    pub recipes: Vec<RecipeSummary>,
}
