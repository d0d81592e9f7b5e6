// ABOUTME: In-memory prep selection state keyed by recipe id
// ABOUTME: Dinner, lunch and generic slots plus the weekly targets they are measured against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Prep Selection State
//!
//! A [`PrepSelection`] is owned by whoever owns the user's session and is
//! passed by reference to the screens or handlers that need it. A recipe id
//! appears at most once per slot. The generic "all selected" set is
//! independent of the dinner and lunch slots.

use crate::config::PrepConfig;
use crate::progress::{compute_progress, ProgressResult};
use prepmyweek_core::models::{PrepSlot, RecipeSummary, SelectedPrepRecipe};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Recipes chosen for the week and the targets they count against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepSelection {
    config: PrepConfig,
    dinners: Vec<SelectedPrepRecipe>,
    lunches: Vec<SelectedPrepRecipe>,
    recipes: Vec<SelectedPrepRecipe>,
}

fn insert_unique(slot: &mut Vec<SelectedPrepRecipe>, recipe: SelectedPrepRecipe) -> bool {
    if slot.iter().any(|existing| existing.id() == recipe.id()) {
        return false;
    }
    slot.push(recipe);
    true
}

fn remove_id(slot: &mut Vec<SelectedPrepRecipe>, recipe_id: i64) -> bool {
    let before = slot.len();
    slot.retain(|existing| existing.id() != recipe_id);
    slot.len() != before
}

impl PrepSelection {
    /// Empty selection measured against `config`
    #[must_use]
    pub fn new(config: PrepConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current targets
    #[must_use]
    pub const fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Replace the targets, keeping the selected recipes
    pub fn set_config(&mut self, config: PrepConfig) {
        self.config = config;
    }

    /// Add to the dinner slot; `false` if already there
    pub fn add_dinner(&mut self, recipe: RecipeSummary) -> bool {
        insert_unique(&mut self.dinners, SelectedPrepRecipe::new(recipe, PrepSlot::Dinner))
    }

    /// Remove from the dinner slot; `false` if it was not there
    pub fn remove_dinner(&mut self, recipe_id: i64) -> bool {
        remove_id(&mut self.dinners, recipe_id)
    }

    /// Add to the lunch slot; `false` if already there
    pub fn add_lunch(&mut self, recipe: RecipeSummary) -> bool {
        insert_unique(&mut self.lunches, SelectedPrepRecipe::new(recipe, PrepSlot::Lunch))
    }

    /// Remove from the lunch slot; `false` if it was not there
    pub fn remove_lunch(&mut self, recipe_id: i64) -> bool {
        remove_id(&mut self.lunches, recipe_id)
    }

    /// Add to the generic set; `false` if already there
    pub fn add_recipe(&mut self, recipe: RecipeSummary) -> bool {
        let slot = PrepSlot::for_course(recipe.course);
        insert_unique(&mut self.recipes, SelectedPrepRecipe::new(recipe, slot))
    }

    /// Remove from the generic set; `false` if it was not there
    pub fn remove_recipe(&mut self, recipe_id: i64) -> bool {
        remove_id(&mut self.recipes, recipe_id)
    }

    /// "Add to Prep": the generic set always, plus the dinner or lunch slot by course
    pub fn select(&mut self, recipe: RecipeSummary) -> PrepSlot {
        let slot = PrepSlot::for_course(recipe.course);
        match slot {
            PrepSlot::Dinner => {
                self.add_dinner(recipe.clone());
            }
            PrepSlot::Lunch => {
                self.add_lunch(recipe.clone());
            }
            PrepSlot::General => {}
        }
        self.add_recipe(recipe);
        slot
    }

    /// "Remove from Prep": drop the id from every slot
    pub fn deselect(&mut self, recipe_id: i64) -> bool {
        let dinner = self.remove_dinner(recipe_id);
        let lunch = self.remove_lunch(recipe_id);
        let generic = self.remove_recipe(recipe_id);
        dinner || lunch || generic
    }

    /// Whether the id is in any slot
    #[must_use]
    pub fn is_selected(&self, recipe_id: i64) -> bool {
        self.dinners
            .iter()
            .chain(&self.lunches)
            .chain(&self.recipes)
            .any(|r| r.id() == recipe_id)
    }

    /// Selected dinners in insertion order
    #[must_use]
    pub fn dinners(&self) -> &[SelectedPrepRecipe] {
        &self.dinners
    }

    /// Selected lunches in insertion order
    #[must_use]
    pub fn lunches(&self) -> &[SelectedPrepRecipe] {
        &self.lunches
    }

    /// Generic "all selected" set in insertion order
    #[must_use]
    pub fn recipes(&self) -> &[SelectedPrepRecipe] {
        &self.recipes
    }

    /// Distinct ids across all slots, first-selected first, for saving a prep
    #[must_use]
    pub fn recipe_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for recipe in self.recipes.iter().chain(&self.dinners).chain(&self.lunches) {
            if !ids.contains(&recipe.id()) {
                ids.push(recipe.id());
            }
        }
        ids
    }

    /// Nothing selected in any slot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dinners.is_empty() && self.lunches.is_empty() && self.recipes.is_empty()
    }

    /// Progress of the dinner and lunch slots against the targets
    #[must_use]
    pub fn progress(&self) -> ProgressResult {
        compute_progress(&self.config, &self.dinners, &self.lunches)
    }

    /// Empty every slot and reset the targets to their defaults
    pub fn clear_prep(&mut self) {
        debug!(
            dinners = self.dinners.len(),
            lunches = self.lunches.len(),
            recipes = self.recipes.len(),
            "Clearing prep selection"
        );
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepmyweek_core::models::Course;

    fn summary(id: i64, course: Course) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Recipe {id}"),
            course,
            total_time: 30,
            servings: 4,
            ingredient_count: 5,
            is_vegetarian: false,
            image_url: None,
        }
    }

    #[test]
    fn test_slot_rejects_duplicate_ids() {
        let mut selection = PrepSelection::default();
        assert!(selection.add_dinner(summary(1, Course::Dinner)));
        assert!(!selection.add_dinner(summary(1, Course::Dinner)));
        assert_eq!(selection.dinners().len(), 1);
    }

    #[test]
    fn test_generic_set_is_independent_of_slots() {
        let mut selection = PrepSelection::default();
        selection.add_dinner(summary(1, Course::Dinner));
        assert!(selection.add_recipe(summary(1, Course::Dinner)));

        assert!(selection.remove_recipe(1));
        assert_eq!(selection.dinners().len(), 1);
        assert!(selection.recipes().is_empty());
    }

    #[test]
    fn test_select_routes_by_course() {
        let mut selection = PrepSelection::default();
        assert_eq!(selection.select(summary(1, Course::Dinner)), PrepSlot::Dinner);
        assert_eq!(selection.select(summary(2, Course::Lunch)), PrepSlot::Lunch);
        assert_eq!(selection.select(summary(3, Course::SnackSide)), PrepSlot::General);

        assert_eq!(selection.dinners().len(), 1);
        assert_eq!(selection.lunches().len(), 1);
        assert_eq!(selection.recipes().len(), 3);
        assert_eq!(selection.recipe_ids(), vec![1, 2, 3]);

        assert!(selection.deselect(1));
        assert!(!selection.is_selected(1));
        assert!(!selection.deselect(1));
    }
}
