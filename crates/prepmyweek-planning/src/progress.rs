// ABOUTME: Prep progress calculator comparing servings needed against servings selected
// ABOUTME: Credits surplus dinner servings toward lunches when leftovers are enabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Prep Progress
//!
//! Pure arithmetic over a validated [`PrepConfig`] and the selected dinner and
//! lunch recipes:
//!
//! - each selected dinner covers one meal for the whole party, whatever its
//!   own `servings` says
//! - each selected lunch contributes its own `servings`
//! - with leftovers on, every dinner's servings beyond the party size are
//!   credited to lunches
//!
//! The dinner/lunch asymmetry matches how the tracker has always counted.

use crate::config::PrepConfig;
use prepmyweek_core::models::SelectedPrepRecipe;
use serde::{Deserialize, Serialize};

/// Serving totals and what is still missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResult {
    /// `numPeople * numDinners`
    pub dinner_servings_needed: u32,
    /// `count(dinners) * numPeople`
    pub dinner_servings_selected: u32,
    /// `numPeople * numLunches`
    pub lunch_servings_needed: u32,
    /// Surplus dinner servings credited to lunches
    pub leftover_lunch_servings: u32,
    /// Sum of the selected lunches' servings
    pub lunch_servings_from_recipes: u32,
    /// Lunch servings from recipes plus leftovers
    pub lunch_servings_counted: u32,
    /// Dinner servings still to pick
    pub dinners_remaining: u32,
    /// Lunch servings still to pick
    pub lunches_remaining: u32,
    /// Both targets are met
    pub complete: bool,
}

/// Compute progress toward the weekly targets
#[must_use]
pub fn compute_progress(
    config: &PrepConfig,
    dinners: &[SelectedPrepRecipe],
    lunches: &[SelectedPrepRecipe],
) -> ProgressResult {
    let people = config.num_people();
    let dinner_count = u32::try_from(dinners.len()).unwrap_or(u32::MAX);

    let dinner_servings_needed = people.saturating_mul(config.num_dinners());
    let dinner_servings_selected = dinner_count.saturating_mul(people);
    let lunch_servings_needed = people.saturating_mul(config.num_lunches());

    let leftover_lunch_servings = if config.use_leftovers() {
        dinners
            .iter()
            .map(|dinner| dinner.servings().saturating_sub(people))
            .fold(0_u32, u32::saturating_add)
    } else {
        0
    };

    let lunch_servings_from_recipes = lunches
        .iter()
        .map(SelectedPrepRecipe::servings)
        .fold(0_u32, u32::saturating_add);
    let lunch_servings_counted = lunch_servings_from_recipes.saturating_add(leftover_lunch_servings);

    let dinners_remaining = dinner_servings_needed.saturating_sub(dinner_servings_selected);
    let lunches_remaining = lunch_servings_needed.saturating_sub(lunch_servings_counted);

    ProgressResult {
        dinner_servings_needed,
        dinner_servings_selected,
        lunch_servings_needed,
        leftover_lunch_servings,
        lunch_servings_from_recipes,
        lunch_servings_counted,
        dinners_remaining,
        lunches_remaining,
        complete: dinners_remaining == 0 && lunches_remaining == 0,
    }
}

impl ProgressResult {
    /// Tracker line for dinners, e.g. `"4 / 12 dinners"`
    #[must_use]
    pub fn dinner_status(&self) -> String {
        format!(
            "{} / {} dinners",
            self.dinner_servings_selected, self.dinner_servings_needed
        )
    }

    /// Tracker line for lunches, e.g. `"2 / 8 lunches"`
    #[must_use]
    pub fn lunch_status(&self) -> String {
        format!(
            "{} / {} lunches",
            self.lunch_servings_counted, self.lunch_servings_needed
        )
    }
}
