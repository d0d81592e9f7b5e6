// ABOUTME: User account database operations
// ABOUTME: Registration, lookup, preference flags, personalised store names and account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::{parse_timestamp, to_u32};
use chrono::{DateTime, Utc};
use prepmyweek_core::errors::{AppError, AppResult};
use prepmyweek_core::models::{
    Course, CustomStoreNames, OwnedRecipe, RecipeStatus, UserProfile,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Stored account, including the password hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Primary key
    pub id: i64,
    /// Unique login email
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Region
    pub region: Option<String>,
    /// Preferred store name
    pub preferred_store: Option<String>,
    /// Moderator flag
    pub is_admin: bool,
    /// Show the onboarding walkthrough
    pub walkthrough_enabled: bool,
    /// Show quantities in metric units
    pub prefer_metric: bool,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public profile without the password hash
    #[must_use]
    pub fn into_profile(self, recipes: Vec<OwnedRecipe>) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
            is_admin: self.is_admin,
            region: self.region,
            preferred_store: self.preferred_store,
            walkthrough_enabled: self.walkthrough_enabled,
            prefer_metric: self.prefer_metric,
            recipes,
        }
    }

    fn from_row(row: &SqliteRow) -> AppResult<Self> {
        let created_at: String = row.try_get("created_at")?;
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            region: row.try_get("region")?,
            preferred_store: row.try_get("preferred_store")?,
            is_admin: row.try_get("is_admin")?,
            walkthrough_enabled: row.try_get("walkthrough_enabled")?,
            prefer_metric: row.try_get("prefer_metric")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

/// Account to insert
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email, already trimmed and lowercased
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Region
    pub region: Option<String>,
    /// Preferred store name
    pub preferred_store: Option<String>,
}

const USER_COLUMNS: &str = "id, email, name, password_hash, region, preferred_store, \
     is_admin, walkthrough_enabled, prefer_metric, created_at";

/// Account operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the email is taken, or a database error.
    pub async fn create(&self, user: &NewUser) -> AppResult<UserRecord> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO users (email, name, password_hash, region, preferred_store, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.region)
        .bind(&user.preferred_store)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::already_exists("An account with this email already exists")
            }
            _ => AppError::database(format!("Failed to create user: {e}")),
        })?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Created user could not be read back"))
    }

    /// Look up an account by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;
        row.as_ref().map(UserRecord::from_row).transpose()
    }

    /// Look up an account by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_by_id(&self, user_id: i64) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;
        row.as_ref().map(UserRecord::from_row).transpose()
    }

    /// Profile with the user's own recipes, any status
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn profile(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        let Some(user) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };
        let recipes = self.owned_recipes(user_id).await?;
        Ok(Some(user.into_profile(recipes)))
    }

    async fn owned_recipes(&self, user_id: i64) -> AppResult<Vec<OwnedRecipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, image_url, course, prep_time, cook_time, status
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list user recipes: {e}")))?;

        rows.iter()
            .map(|row| {
                let course: String = row.try_get("course")?;
                let status: String = row.try_get("status")?;
                Ok(OwnedRecipe {
                    id: row.try_get("id")?,
                    title: row.try_get("title")?,
                    image_url: row.try_get("image_url")?,
                    course: Course::parse(&course).unwrap_or_default(),
                    prep_time: to_u32(row.try_get("prep_time")?),
                    cook_time: to_u32(row.try_get("cook_time")?),
                    status: RecipeStatus::parse(&status),
                })
            })
            .collect()
    }

    async fn set_flag(&self, user_id: i64, column: &str, value: bool) -> AppResult<bool> {
        let result = sqlx::query(&format!("UPDATE users SET {column} = $1 WHERE id = $2"))
            .bind(value)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update {column}: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle the onboarding walkthrough
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_walkthrough(&self, user_id: i64, enabled: bool) -> AppResult<bool> {
        self.set_flag(user_id, "walkthrough_enabled", enabled).await
    }

    /// Toggle metric display
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_prefer_metric(&self, user_id: i64, prefer_metric: bool) -> AppResult<bool> {
        self.set_flag(user_id, "prefer_metric", prefer_metric).await
    }

    /// Grant or revoke moderator rights
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> AppResult<bool> {
        self.set_flag(user_id, "is_admin", is_admin).await
    }

    /// Personalised store names, keyed by store id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn custom_store_names(&self, user_id: i64) -> AppResult<CustomStoreNames> {
        let rows = sqlx::query(
            "SELECT store_id, name FROM custom_store_names WHERE user_id = $1 ORDER BY store_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get custom store names: {e}")))?;

        rows.iter()
            .map(|row| {
                let store_id: i64 = row.try_get("store_id")?;
                let name: String = row.try_get("name")?;
                Ok((store_id, name))
            })
            .collect()
    }

    /// Replace the personalised store names; blank names are dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_custom_store_names(
        &self,
        user_id: i64,
        names: &CustomStoreNames,
    ) -> AppResult<CustomStoreNames> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM custom_store_names WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut kept = CustomStoreNames::new();
        for (store_id, name) in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            sqlx::query(
                "INSERT INTO custom_store_names (user_id, store_id, name) VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(store_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
            kept.insert(*store_id, name.to_owned());
        }

        tx.commit().await?;
        Ok(kept)
    }

    /// Delete the account; recipes, preps and store names cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
