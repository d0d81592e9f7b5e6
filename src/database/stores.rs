// ABOUTME: Grocery store database operations
// ABOUTME: Lists and creates the stores recipes can be linked to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use chrono::Utc;
use prepmyweek_core::errors::{AppError, AppResult};
use prepmyweek_core::models::Store;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn store_from_row(row: &SqliteRow) -> AppResult<Store> {
    Ok(Store {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        logo_url: row.try_get("logo_url")?,
    })
}

/// Store operations
pub struct StoreManager {
    pool: SqlitePool,
}

impl StoreManager {
    /// Create a new store manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All stores by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list(&self) -> AppResult<Vec<Store>> {
        let rows = sqlx::query("SELECT id, name, logo_url FROM stores ORDER BY name COLLATE NOCASE, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list stores: {e}")))?;
        rows.iter().map(store_from_row).collect()
    }

    /// Look up one store
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get(&self, store_id: i64) -> AppResult<Option<Store>> {
        let row = sqlx::query("SELECT id, name, logo_url FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get store: {e}")))?;
        row.as_ref().map(store_from_row).transpose()
    }

    /// Insert a store
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, name: &str, logo_url: Option<&str>) -> AppResult<Store> {
        let id = sqlx::query("INSERT INTO stores (name, logo_url, created_at) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(logo_url)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create store: {e}")))?
            .last_insert_rowid();

        Ok(Store {
            id,
            name: name.to_owned(),
            logo_url: logo_url.map(str::to_owned),
        })
    }
}
