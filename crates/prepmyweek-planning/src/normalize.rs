// ABOUTME: Ingredient name normalization, validation, and grocery merge keys
// ABOUTME: Single source of truth for how ingredient names are compared and stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use prepmyweek_core::constants::limits::{INGREDIENT_NAME_MAX, INGREDIENT_NAME_MIN};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Letters, digits, whitespace, hyphens and apostrophes
static VALID_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-']+$").ok());

/// Runs of whitespace inside a name
static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Apostrophe look-alikes, including the UTF-8-read-as-latin1 artifact of `’`
const APOSTROPHE_VARIANTS: [&str; 4] = ["\u{2019}", "\u{2018}", "\u{00e2}\u{20ac}\u{2122}", "`"];

/// Rejected ingredient name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngredientNameError {
    /// Shorter than the minimum or longer than the maximum after normalization
    #[error("Invalid ingredient name '{name}' - must be {min}-{max} characters")]
    Length {
        /// Name as submitted
        name: String,
        /// Minimum length
        min: usize,
        /// Maximum length
        max: usize,
    },
    /// Contains characters outside the allowed set
    #[error("Invalid ingredient name '{name}' - only letters, numbers, spaces, hyphens and apostrophes are allowed")]
    Characters {
        /// Name as submitted
        name: String,
    },
}

/// Normalize an ingredient name for storage and comparison
///
/// Trims, lowercases, folds apostrophe variants to `'` and collapses inner
/// whitespace runs to a single space.
#[must_use]
pub fn normalize_ingredient_name(raw: &str) -> String {
    let mut name = raw.trim().to_lowercase();
    for variant in APOSTROPHE_VARIANTS {
        if name.contains(variant) {
            name = name.replace(variant, "'");
        }
    }
    match WHITESPACE_RUN.as_ref() {
        Some(re) => re.replace_all(&name, " ").into_owned(),
        None => name,
    }
}

/// Normalize and validate an ingredient name submitted with a recipe
///
/// # Errors
///
/// Returns [`IngredientNameError`] when the normalized name is outside
/// 2-50 characters or contains disallowed characters.
pub fn validate_ingredient_name(raw: &str) -> Result<String, IngredientNameError> {
    let name = normalize_ingredient_name(raw);
    let len = name.chars().count();
    if !(INGREDIENT_NAME_MIN..=INGREDIENT_NAME_MAX).contains(&len) {
        return Err(IngredientNameError::Length {
            name: raw.to_owned(),
            min: INGREDIENT_NAME_MIN,
            max: INGREDIENT_NAME_MAX,
        });
    }

    let valid = VALID_NAME_PATTERN
        .as_ref()
        .map_or_else(|| name.chars().all(is_allowed_char), |re| re.is_match(&name));
    if !valid {
        return Err(IngredientNameError::Characters {
            name: raw.to_owned(),
        });
    }

    Ok(name)
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '\''
}

/// Grocery merge key: `trim(lowercase(name)) + "|" + unit`
///
/// Units are compared verbatim after trimming; `None` and `""` are the same unit.
#[must_use]
pub fn merge_key(name: &str, unit: Option<&str>) -> String {
    let unit = unit.map(str::trim).unwrap_or_default();
    format!("{}|{unit}", name.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_whitespace_and_apostrophes() {
        assert_eq!(normalize_ingredient_name("  Baker\u{2019}s   Yeast "), "baker's yeast");
        assert_eq!(normalize_ingredient_name("Tomato"), "tomato");
        assert_eq!(
            normalize_ingredient_name("cook\u{00e2}\u{20ac}\u{2122}s salt"),
            "cook's salt"
        );
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(matches!(
            validate_ingredient_name("a"),
            Err(IngredientNameError::Length { .. })
        ));
        assert!(matches!(
            validate_ingredient_name(&"x".repeat(51)),
            Err(IngredientNameError::Length { .. })
        ));
        assert!(matches!(
            validate_ingredient_name("salt & pepper"),
            Err(IngredientNameError::Characters { .. })
        ));
        assert_eq!(validate_ingredient_name(" Jalape-no ").unwrap(), "jalape-no");
    }

    #[test]
    fn test_merge_key() {
        assert_eq!(merge_key("Tomato", Some("lb")), merge_key("tomato ", Some("lb")));
        assert_eq!(merge_key("rice", None), merge_key("rice", Some("")));
        assert_ne!(merge_key("rice", Some("cup")), merge_key("rice", Some("g")));
    }
}
