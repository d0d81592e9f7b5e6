// ABOUTME: User account and grocery store models returned by the API
// ABOUTME: Defines UserProfile, OwnedRecipe, Store, and the personalised store name map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::recipe::{Course, RecipeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grocery store recipes can be linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A recipe the user submitted, with its moderation status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedRecipe {
    /// Recipe id
    pub id: i64,
    /// Title
    pub title: String,
    /// Optional image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Course
    pub course: Course,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    /// Moderation status
    pub status: RecipeStatus,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Moderator flag
    pub is_admin: bool,
    /// Region, e.g. a country or state code
    #[serde(default)]
    pub region: Option<String>,
    /// Preferred grocery store name
    #[serde(default)]
    pub preferred_store: Option<String>,
    /// Show walkthrough popups
    pub walkthrough_enabled: bool,
    /// Show quantities in metric units
    pub prefer_metric: bool,
    /// Recipes submitted by this user
    #[serde(default)]
    pub recipes: Vec<OwnedRecipe>,
}

/// Personalised store names keyed by store id
pub type CustomStoreNames = BTreeMap<i64, String>;
