// ABOUTME: Grocery list aggregation over the ingredient lines of selected recipes
// ABOUTME: Groups by store section and merges lines sharing a normalized name and unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Grocery List Aggregation
//!
//! [`aggregate`] walks every ingredient line of every recipe and produces a
//! [`GroceryList`]: store section → merge key → [`GroupedIngredient`]. Two lines
//! merge iff their trimmed lowercase names and their units are identical.
//!
//! Bad data never fails aggregation. A missing or non-numeric quantity counts
//! as `0` and a missing unit as `""`, and both are logged.
//!
//! Recipes are not de-duplicated: passing the same recipe twice counts its
//! ingredients twice.

use crate::normalize::merge_key;
use crate::sections::ordered_sections;
use crate::units::{present_metric, to_metric_base};
use prepmyweek_core::constants::grocery::DEFAULT_SECTION;
use prepmyweek_core::models::{IngredientLine, RecipeWithIngredients};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One merged shopping-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedIngredient {
    /// Display name, casing of the first line seen
    pub name: String,
    /// Unit shared by every merged line
    pub unit: String,
    /// Sum of the merged lines' quantities
    pub quantity: f64,
    /// Store section the entry is filed under
    pub section: String,
}

/// Aggregation knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Convert US units to metric before merging
    pub prefer_metric: bool,
}

/// Grocery list as returned by `POST /api/grocery-list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListResponse {
    /// Entries per section, sorted by display name
    pub grocery_list: BTreeMap<String, Vec<GroupedIngredient>>,
    /// Section names in shopping order
    pub sections: Vec<String>,
}

/// Ingredients grouped by store section, keyed by merge key within a section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroceryList {
    sections: BTreeMap<String, BTreeMap<String, GroupedIngredient>>,
}

impl GroceryList {
    /// True when no ingredient was aggregated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of merged entries across all sections
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    /// Entries filed under `section`
    #[must_use]
    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, GroupedIngredient>> {
        self.sections.get(section)
    }

    /// Look up a single entry
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&GroupedIngredient> {
        self.sections.get(section).and_then(|entries| entries.get(key))
    }

    /// Section names in lexical order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Every entry with its merge key
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GroupedIngredient)> {
        self.sections
            .values()
            .flat_map(|entries| entries.iter().map(|(key, item)| (key.as_str(), item)))
    }

    /// Section names in shopping order
    #[must_use]
    pub fn ordered_section_names(&self) -> Vec<String> {
        ordered_sections(self.section_names())
    }

    /// Sections in shopping order with their entries sorted by display name
    #[must_use]
    pub fn into_display(self) -> Vec<(String, Vec<GroupedIngredient>)> {
        let order = self.ordered_section_names();
        let mut sections = self.sections;
        order
            .into_iter()
            .filter_map(|name| {
                let entries = sections.remove(&name)?;
                let mut items: Vec<GroupedIngredient> = entries.into_values().collect();
                items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                Some((name, items))
            })
            .collect()
    }

    /// Wire shape `{groceryList: {section: [items]}, sections: [...]}`
    #[must_use]
    pub fn into_response(self) -> GroceryListResponse {
        let display = self.into_display();
        let sections = display.iter().map(|(name, _)| name.clone()).collect();
        GroceryListResponse {
            grocery_list: display.into_iter().collect(),
            sections,
        }
    }

    fn add_line(&mut self, line: &IngredientLine, options: AggregateOptions) {
        let section = line
            .store_section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SECTION);

        let quantity = line_quantity(line);
        let unit = line.unit.as_deref().map(str::trim).unwrap_or_else(|| {
            debug!(ingredient = %line.name, "Ingredient line has no unit, using empty unit");
            ""
        });

        let (quantity, unit) = if options.prefer_metric {
            to_metric_base(quantity, unit)
        } else {
            (quantity, unit.to_owned())
        };

        let key = merge_key(&line.name, Some(&unit));
        self.sections
            .entry(section.to_owned())
            .or_default()
            .entry(key)
            .and_modify(|entry| entry.quantity += quantity)
            .or_insert_with(|| GroupedIngredient {
                name: line.name.trim().to_owned(),
                unit,
                quantity,
                section: section.to_owned(),
            });
    }

    fn promote_metric_units(&mut self) {
        for entry in self.sections.values_mut().flat_map(BTreeMap::values_mut) {
            let (quantity, unit) = present_metric(entry.quantity, &entry.unit);
            entry.quantity = quantity;
            entry.unit = unit;
        }
    }
}

/// Numeric quantity of a line, `0` when missing or unparseable
fn line_quantity(line: &IngredientLine) -> f64 {
    match &line.quantity {
        None => {
            warn!(ingredient = %line.name, "Ingredient line has no quantity, counting as 0");
            0.0
        }
        Some(quantity) => quantity.as_f64().unwrap_or_else(|| {
            warn!(
                ingredient = %line.name,
                raw = %quantity,
                "Non-numeric ingredient quantity, counting as 0"
            );
            0.0
        }),
    }
}

/// Aggregate the ingredient lines of `recipes` into a grocery list
#[must_use]
pub fn aggregate(recipes: &[RecipeWithIngredients]) -> GroceryList {
    aggregate_with(recipes, AggregateOptions::default())
}

/// Aggregate with explicit options
///
/// With `prefer_metric`, US units are converted to ml/g before merging, so
/// "1 cup" and "2 tbsp" of the same ingredient land in one entry. The merged
/// totals are then promoted to l/kg where large and rounded to one decimal.
#[must_use]
pub fn aggregate_with(recipes: &[RecipeWithIngredients], options: AggregateOptions) -> GroceryList {
    let mut list = GroceryList::default();
    for line in recipes.iter().flat_map(|recipe| &recipe.ingredients) {
        list.add_line(line, options);
    }
    if options.prefer_metric {
        list.promote_metric_units();
    }

    debug!(
        recipes = recipes.len(),
        sections = list.sections.len(),
        entries = list.entry_count(),
        "Aggregated grocery list"
    );
    list
}
