// ABOUTME: Weekly prep targets supplied before recipe selection
// ABOUTME: Validates party size and meal counts into a PrepConfig the calculator can trust
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use prepmyweek_core::errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected prep targets, shown to the user as a blocking message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrepConfigError {
    /// Party size below one
    #[error("Number of people must be at least 1.")]
    TooFewPeople,
    /// Negative lunch or dinner count
    #[error("Number of lunches and dinners cannot be negative.")]
    NegativeMeals,
    /// Count does not fit the supported range
    #[error("Meal counts are too large.")]
    OutOfRange,
}

impl From<PrepConfigError> for AppError {
    fn from(error: PrepConfigError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

/// Unvalidated targets as they arrive in a request body
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrepConfig {
    num_people: i64,
    #[serde(default)]
    num_lunches: i64,
    #[serde(default)]
    num_dinners: i64,
    #[serde(default)]
    use_leftovers: bool,
}

impl TryFrom<RawPrepConfig> for PrepConfig {
    type Error = PrepConfigError;

    fn try_from(raw: RawPrepConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.num_people,
            raw.num_lunches,
            raw.num_dinners,
            raw.use_leftovers,
        )
    }
}

/// Validated weekly targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPrepConfig")]
pub struct PrepConfig {
    num_people: u32,
    num_lunches: u32,
    num_dinners: u32,
    use_leftovers: bool,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            num_people: 1,
            num_lunches: 0,
            num_dinners: 0,
            use_leftovers: false,
        }
    }
}

impl PrepConfig {
    /// Validate raw form input
    ///
    /// # Errors
    ///
    /// Returns [`PrepConfigError`] when `num_people < 1`, either meal count is
    /// negative, or a value exceeds `u32::MAX`.
    pub fn new(
        num_people: i64,
        num_lunches: i64,
        num_dinners: i64,
        use_leftovers: bool,
    ) -> Result<Self, PrepConfigError> {
        if num_people < 1 {
            return Err(PrepConfigError::TooFewPeople);
        }
        if num_lunches < 0 || num_dinners < 0 {
            return Err(PrepConfigError::NegativeMeals);
        }

        let to_u32 = |v: i64| u32::try_from(v).map_err(|_| PrepConfigError::OutOfRange);
        Ok(Self {
            num_people: to_u32(num_people)?,
            num_lunches: to_u32(num_lunches)?,
            num_dinners: to_u32(num_dinners)?,
            use_leftovers,
        })
    }

    /// Parse form fields the way the config screens do: unparseable text counts as 0
    ///
    /// # Errors
    ///
    /// Same as [`PrepConfig::new`].
    pub fn from_form(
        num_people: &str,
        num_lunches: &str,
        num_dinners: &str,
        use_leftovers: bool,
    ) -> Result<Self, PrepConfigError> {
        let parse = |s: &str| s.trim().parse::<i64>().unwrap_or(0);
        Self::new(
            parse(num_people),
            parse(num_lunches),
            parse(num_dinners),
            use_leftovers,
        )
    }

    /// Party size, always at least 1
    #[must_use]
    pub const fn num_people(&self) -> u32 {
        self.num_people
    }

    /// Lunches to cover this week
    #[must_use]
    pub const fn num_lunches(&self) -> u32 {
        self.num_lunches
    }

    /// Dinners to cover this week
    #[must_use]
    pub const fn num_dinners(&self) -> u32 {
        self.num_dinners
    }

    /// Whether surplus dinner servings count toward lunches
    #[must_use]
    pub const fn use_leftovers(&self) -> bool {
        self.use_leftovers
    }
}
