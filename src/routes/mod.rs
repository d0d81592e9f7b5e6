// ABOUTME: Route module organization for the PrepMyWeek HTTP API
// ABOUTME: One module per domain, each exposing a routes() constructor merged by the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! Route modules for the `PrepMyWeek` REST API
//!
//! Each domain module holds route definitions and thin handlers that
//! authenticate, validate, and delegate to the database managers.

/// Recipe moderation routes
pub mod admin;
/// Feedback submission route
pub mod feedback;
/// Grocery list route
pub mod grocery;
/// Health check and readiness routes
pub mod health;
/// Current prep and prep history routes
pub mod preps;
/// Recipe CRUD routes
pub mod recipes;
/// Grocery store routes
pub mod stores;
/// Account, login and preference routes
pub mod users;

pub use admin::AdminRoutes;
pub use feedback::FeedbackRoutes;
pub use grocery::GroceryRoutes;
pub use health::HealthRoutes;
pub use preps::PrepRoutes;
pub use recipes::RecipeRoutes;
pub use stores::StoreRoutes;
pub use users::UserRoutes;
