// ABOUTME: Recipe and ingredient line models exchanged between server, clients, and planner
// ABOUTME: Defines Course, RecipeStatus, Quantity, IngredientLine, recipe summary and detail types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recipe category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Course {
    /// Evening meal, counted against the dinner target
    #[default]
    Dinner,
    /// Midday meal, counted against the lunch target
    Lunch,
    /// Snacks and side dishes, never counted by the progress tracker
    SnackSide,
    /// Breakfast, never counted by the progress tracker
    Breakfast,
}

impl Course {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dinner => "DINNER",
            Self::Lunch => "LUNCH",
            Self::SnackSide => "SNACK_SIDE",
            Self::Breakfast => "BREAKFAST",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DINNER" => Some(Self::Dinner),
            "LUNCH" => Some(Self::Lunch),
            "SNACK_SIDE" => Some(Self::SnackSide),
            "BREAKFAST" => Some(Self::Breakfast),
            _ => None,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation status of a user-submitted recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    /// Awaiting admin review, hidden from public listings
    #[default]
    Pending,
    /// Visible to everyone
    Approved,
    /// Rejected by an admin
    Rejected,
}

impl RecipeStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// Ingredient quantity as it arrives on the wire
///
/// Clients send either a JSON number or a string such as `"1 1/2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Plain numeric amount
    Number(f64),
    /// Free-form amount, possibly a fraction or mixed number
    Text(String),
}

impl Quantity {
    /// Numeric value of this quantity
    ///
    /// Accepts decimals (`"0.5"`), fractions (`"1/2"`) and mixed numbers
    /// (`"1 1/2"`). Returns `None` for anything else, including non-finite numbers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => parse_amount(s),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn parse_fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    if let Some((whole, frac)) = s.split_once(char::is_whitespace) {
        let whole: f64 = whole.parse().ok()?;
        return parse_fraction(frac.trim()).map(|f| whole + f);
    }
    parse_fraction(s)
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    /// Shared ingredient row id
    #[serde(default, alias = "id")]
    pub ingredient_id: i64,
    /// Normalized ingredient name
    pub name: String,
    /// Amount, possibly absent or non-numeric on legacy rows
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// Measurement unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Grocery store section used for grouping
    #[serde(default, alias = "section")]
    pub store_section: Option<String>,
    /// Optional garnish or extra
    #[serde(default)]
    pub is_optional: bool,
    /// Preparation note ("diced", "minced")
    #[serde(default)]
    pub preparation: Option<String>,
}

/// Recipe snapshot used in listings and prep selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Recipe id
    pub id: i64,
    /// Display title
    pub title: String,
    /// Recipe category
    pub course: Course,
    /// `prepTime + cookTime` in minutes
    #[serde(default)]
    pub total_time: u32,
    /// Servings the recipe yields
    #[serde(default)]
    pub servings: u32,
    /// Number of ingredient lines
    #[serde(default)]
    pub ingredient_count: u32,
    /// No meat or fish among the ingredients
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Optional image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Recipe detail with nested ingredient lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWithIngredients {
    /// Summary fields
    #[serde(flatten)]
    pub summary: RecipeSummary,
    /// Ingredient lines in entry order
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

/// Full recipe as shown on the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    /// Summary fields and ingredient lines
    #[serde(flatten)]
    pub recipe: RecipeWithIngredients,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Cooking instructions
    pub instructions: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    /// Moderation status
    pub status: RecipeStatus,
    /// Submitting user
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Stores the recipe is linked to
    #[serde(default)]
    pub store_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(Quantity::Number(2.0).as_f64(), Some(2.0));
        assert_eq!(Quantity::Text("0.25".into()).as_f64(), Some(0.25));
        assert_eq!(Quantity::Text("1/2".into()).as_f64(), Some(0.5));
        assert_eq!(Quantity::Text(" 1 1/2 ".into()).as_f64(), Some(1.5));
        assert_eq!(Quantity::Text("a pinch".into()).as_f64(), None);
        assert_eq!(Quantity::Text("1/0".into()).as_f64(), None);
        assert_eq!(Quantity::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_course_wire_format() {
        let json = serde_json::to_string(&Course::SnackSide).unwrap();
        assert_eq!(json, "\"SNACK_SIDE\"");
        assert_eq!(Course::parse("lunch"), Some(Course::Lunch));
        assert_eq!(Course::parse("brunch"), None);
    }

    #[test]
    fn test_recipe_detail_deserializes_from_api_shape() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Chili",
            "course": "DINNER",
            "totalTime": 45,
            "servings": 6,
            "ingredientCount": 1,
            "isVegetarian": false,
            "imageUrl": null,
            "ingredients": [{
                "id": 3,
                "name": "ground beef",
                "quantity": "1 1/2",
                "unit": "lb",
                "storeSection": "meat",
                "isOptional": false,
                "preparation": null
            }]
        });

        let recipe: RecipeWithIngredients = serde_json::from_value(json).unwrap();
        assert_eq!(recipe.summary.servings, 6);
        assert_eq!(recipe.ingredients[0].ingredient_id, 3);
        assert_eq!(
            recipe.ingredients[0].quantity.as_ref().and_then(Quantity::as_f64),
            Some(1.5)
        );
    }
}
