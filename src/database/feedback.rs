// ABOUTME: Feedback database operations
// ABOUTME: Stores bug reports and feature requests submitted from the apps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use chrono::Utc;
use prepmyweek_core::errors::{AppError, AppResult};
use prepmyweek_core::models::FeedbackKind;
use sqlx::SqlitePool;

/// Feedback operations
pub struct FeedbackManager {
    pool: SqlitePool,
}

impl FeedbackManager {
    /// Create a new feedback manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a submission and return its id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, user_id: i64, kind: FeedbackKind, message: &str) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO feedback (user_id, kind, message, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(message)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save feedback: {e}")))?;
        Ok(result.last_insert_rowid())
    }

    /// Number of submissions of one kind
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count(&self, kind: FeedbackKind) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE kind = $1")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count feedback: {e}")))
    }
}
