// ABOUTME: Application-wide constants shared across crates
// ABOUTME: Section defaults, service names, and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

/// Service identifiers used in logs and token audiences
pub mod service_names {
    /// Server binary / tracing target
    pub const PREPMYWEEK_SERVER: &str = "prepmyweek-server";
    /// JWT audience for user tokens
    pub const API_AUDIENCE: &str = "prepmyweek-api";
}

/// Grocery list grouping
pub mod grocery {
    /// Section used when an ingredient line carries none
    pub const DEFAULT_SECTION: &str = "Other";
}

/// Input validation limits
pub mod limits {
    /// Minimum ingredient name length after normalization
    pub const INGREDIENT_NAME_MIN: usize = 2;
    /// Maximum ingredient name length after normalization
    pub const INGREDIENT_NAME_MAX: usize = 50;
    /// Maximum recipe title length
    pub const RECIPE_TITLE_MAX: usize = 100;
    /// Default page size for recipe listings
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Upper bound for page size
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Maximum feedback message length
    pub const FEEDBACK_MESSAGE_MAX: usize = 2000;
}
