// ABOUTME: Benchmark fixtures for generating realistic recipe data
// ABOUTME: Deterministic recipes with overlapping ingredients so aggregation has merging to do
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use prepmyweek_core::models::{
    Course, IngredientLine, Quantity, RecipeSummary, RecipeWithIngredients,
};

/// Predefined prep sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum PrepSize {
    /// A typical week: 7 recipes
    Week,
    /// A large batch, e.g. an admin previewing many recipes
    Batch,
}

impl PrepSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Week => 7,
            Self::Batch => 200,
        }
    }
}

const PANTRY: &[(&str, &str, &str)] = &[
    ("onion", "whole", "Produce"),
    ("garlic", "cloves", "Produce"),
    ("milk", "cups", "Dairy"),
    ("butter", "tbsp", "Dairy"),
    ("chicken thigh", "lb", "Meat"),
    ("olive oil", "tbsp", "Pantry"),
    ("rice", "cups", "Grains"),
    ("cumin", "tsp", "Spices"),
    ("canned tomatoes", "oz", "Canned Goods"),
    ("tortillas", "", "Bakery"),
    ("fish sauce", "tsp", "International"),
    ("lemon", "whole", ""),
];

/// Generate `count` recipes of eight lines each, drawn round-robin from a shared pantry
#[must_use]
pub fn generate_recipes(count: usize) -> Vec<RecipeWithIngredients> {
    (0..count)
        .map(|i| {
            let ingredients = (0..8)
                .map(|j| {
                    let (name, unit, section) = PANTRY[(i + j * 5) % PANTRY.len()];
                    let quantity = if j % 3 == 0 {
                        Quantity::Text("1 1/2".to_owned())
                    } else {
                        Quantity::Number(f64::from(u32::try_from(j + 1).unwrap_or(1)))
                    };
                    IngredientLine {
                        ingredient_id: i64::try_from(j).unwrap_or_default(),
                        name: name.to_owned(),
                        quantity: Some(quantity),
                        unit: (!unit.is_empty()).then(|| unit.to_owned()),
                        store_section: (!section.is_empty()).then(|| section.to_owned()),
                        is_optional: false,
                        preparation: None,
                    }
                })
                .collect::<Vec<_>>();
            RecipeWithIngredients {
                summary: RecipeSummary {
                    id: i64::try_from(i).unwrap_or_default(),
                    title: format!("Recipe {i}"),
                    course: if i % 2 == 0 { Course::Dinner } else { Course::Lunch },
                    total_time: 30,
                    servings: 4,
                    ingredient_count: 8,
                    is_vegetarian: false,
                    image_url: None,
                },
                ingredients,
            }
        })
        .collect()
}
