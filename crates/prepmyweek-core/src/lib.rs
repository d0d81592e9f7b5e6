// ABOUTME: Core types for the PrepMyWeek meal planning platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![deny(unsafe_code)]

//! # `PrepMyWeek` Core
//!
//! Foundation crate shared by the planner, the API client, and the REST server.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Recipes, ingredient lines, and prep selections
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Page-number pagination with clamped limits

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain models exchanged over the API
pub mod models;

/// Application constants organized by domain
pub mod constants;

/// Page-number pagination for listings
pub mod pagination;
