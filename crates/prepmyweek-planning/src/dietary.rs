// ABOUTME: Vegetarian classification from ingredient names
// ABOUTME: Whole-word match against a meat and fish keyword table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

/// Meat, poultry and fish words; a recipe containing any of them is not vegetarian
const MEAT_KEYWORDS: &[&str] = &[
    "anchovy", "anchovies", "bacon", "beef", "bison", "brisket", "chicken", "chorizo", "clam",
    "clams", "cod", "crab", "duck", "fish", "gelatin", "ham", "halibut", "lamb", "lobster",
    "meatball", "meatballs", "mussels", "oyster", "oysters", "pancetta", "pepperoni", "pork",
    "prosciutto", "salami", "salmon", "sausage", "scallops", "shrimp", "steak", "tilapia",
    "tuna", "turkey", "veal", "venison",
];

/// Words that neutralize a meat keyword when they precede it ("veggie sausage")
const PLANT_BASED_MARKERS: &[&str] = &["veggie", "vegan", "vegetarian", "plant-based", "meatless"];

/// Whether an ingredient name denotes meat or fish
///
/// Stock and broth count as meat (`"chicken broth"`). A plant-based marker
/// before the keyword clears it (`"vegan chorizo"`).
#[must_use]
pub fn is_meat_ingredient(name: &str) -> bool {
    let lowered = name.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    words.iter().enumerate().any(|(i, word)| {
        MEAT_KEYWORDS.contains(word)
            && !words[..i]
                .iter()
                .any(|prior| PLANT_BASED_MARKERS.contains(prior))
    })
}

/// A recipe is vegetarian when none of its ingredients is meat or fish
pub fn is_vegetarian<'a, I>(ingredient_names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !ingredient_names.into_iter().any(is_meat_ingredient)
}
