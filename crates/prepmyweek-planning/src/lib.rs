// ABOUTME: Meal prep planning engine for PrepMyWeek
// ABOUTME: Grocery aggregation, section ordering, unit conversion, progress tracking, selection state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![deny(unsafe_code)]

//! # `PrepMyWeek` Planning
//!
//! Pure, synchronous planning logic shared by the REST server and API
//! clients. Nothing here performs I/O; every function is safe to call
//! repeatedly and from any thread.
//!
//! ## Modules
//!
//! - **grocery**: Merge ingredient lines into a sectioned grocery list
//! - **sections**: Shopping order of store sections
//! - **normalize**: Ingredient name normalization, validation, merge keys
//! - **units**: US customary to metric conversion
//! - **config**: Validated weekly targets
//! - **progress**: Servings needed versus servings selected
//! - **selection**: Dinner, lunch and generic recipe slots
//! - **dietary**: Vegetarian classification

/// Weekly prep targets and their validation
pub mod config;
/// Vegetarian classification from ingredient names
pub mod dietary;
/// Grocery list aggregation
pub mod grocery;
/// Ingredient name normalization and merge keys
pub mod normalize;
/// Prep progress calculator
pub mod progress;
/// Store section ordering
pub mod sections;
/// Prep selection state
pub mod selection;
/// Metric unit conversion
pub mod units;

pub use config::{PrepConfig, PrepConfigError};
pub use grocery::{
    aggregate, aggregate_with, AggregateOptions, GroceryList, GroceryListResponse, GroupedIngredient,
};
pub use progress::{compute_progress, ProgressResult};
pub use selection::PrepSelection;
