// ABOUTME: Prep database operations for the current week and the prep history
// ABOUTME: Current prep is overwritten per user; past preps are append-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::parse_timestamp;
use chrono::{DateTime, Utc};
use prepmyweek_core::errors::{AppError, AppResult};
use sqlx::{Row, SqlitePool};

/// Saved current prep: recipe ids in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPrepRecord {
    /// Recipe ids
    pub recipe_ids: Vec<i64>,
    /// Last save
    pub updated_at: DateTime<Utc>,
}

/// One entry of the prep history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastPrepRecord {
    /// Primary key
    pub id: i64,
    /// Name given at finalization
    pub name: String,
    /// Finalization time
    pub created_at: DateTime<Utc>,
    /// Recipe ids in selection order
    pub recipe_ids: Vec<i64>,
}

/// Prep operations
pub struct PrepManager {
    pool: SqlitePool,
}

impl PrepManager {
    /// Create a new prep manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's saved current prep, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn current(&self, user_id: i64) -> AppResult<Option<CurrentPrepRecord>> {
        let row = sqlx::query("SELECT recipe_ids, updated_at FROM current_preps WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get current prep: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let ids: String = row.try_get("recipe_ids")?;
        let updated_at: String = row.try_get("updated_at")?;
        Ok(Some(CurrentPrepRecord {
            recipe_ids: serde_json::from_str(&ids)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }

    /// Overwrite the user's current prep
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn save_current(&self, user_id: i64, recipe_ids: &[i64]) -> AppResult<DateTime<Utc>> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO current_preps (user_id, recipe_ids, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id) DO UPDATE SET recipe_ids = excluded.recipe_ids,
                                               updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(serde_json::to_string(recipe_ids)?)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save current prep: {e}")))?;
        Ok(now)
    }

    /// Append a prep to the history
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_past(
        &self,
        user_id: i64,
        name: &str,
        recipe_ids: &[i64],
    ) -> AppResult<PastPrepRecord> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO past_preps (user_id, name, created_at) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(name)
            .bind(now.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save past prep: {e}")))?
            .last_insert_rowid();

        for (position, recipe_id) in (0_i64..).zip(recipe_ids) {
            sqlx::query(
                "INSERT INTO past_prep_recipes (past_prep_id, position, recipe_id) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(position)
            .bind(*recipe_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(PastPrepRecord {
            id,
            name: name.to_owned(),
            created_at: now,
            recipe_ids: recipe_ids.to_vec(),
        })
    }

    /// The user's prep history, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_past(&self, user_id: i64) -> AppResult<Vec<PastPrepRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at FROM past_preps WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list past preps: {e}")))?;

        let mut preps = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.try_get("id")?;
            let created_at: String = row.try_get("created_at")?;
            preps.push(PastPrepRecord {
                id,
                name: row.try_get("name")?,
                created_at: parse_timestamp(&created_at)?,
                recipe_ids: self.past_recipe_ids(id).await?,
            });
        }
        Ok(preps)
    }

    /// One past prep, only if it belongs to `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_past(&self, user_id: i64, prep_id: i64) -> AppResult<Option<PastPrepRecord>> {
        let row = sqlx::query(
            "SELECT id, name, created_at FROM past_preps WHERE id = $1 AND user_id = $2",
        )
        .bind(prep_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get past prep: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let created_at: String = row.try_get("created_at")?;
        Ok(Some(PastPrepRecord {
            id: prep_id,
            name: row.try_get("name")?,
            created_at: parse_timestamp(&created_at)?,
            recipe_ids: self.past_recipe_ids(prep_id).await?,
        }))
    }

    async fn past_recipe_ids(&self, prep_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar(
            "SELECT recipe_id FROM past_prep_recipes WHERE past_prep_id = $1 ORDER BY position",
        )
        .bind(prep_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get past prep recipes: {e}")))
    }
}
