// ABOUTME: SQLite persistence for users, recipes, stores, preps and feedback
// ABOUTME: Owns the connection pool, runs schema migrations, and hands out per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Database Management
//!
//! A single [`Database`] owns the `SQLite` pool. Each table family has a
//! manager that borrows a clone of the pool; managers are cheap to create
//! per request.

/// Feedback submissions
pub mod feedback;
/// Current and past preps
pub mod preps;
/// Recipes, ingredient lines and store links
pub mod recipes;
/// Grocery stores
pub mod stores;
/// Accounts, preferences and personalised store names
pub mod users;

pub use feedback::FeedbackManager;
pub use preps::{CurrentPrepRecord, PastPrepRecord, PrepManager};
pub use recipes::{IngredientInput, RecipeInput, RecipeManager};
pub use stores::StoreManager;
pub use users::{NewUser, UserManager, UserRecord};

use chrono::{DateTime, Utc};
use prepmyweek_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 8;

/// Schema, one statement per entry, applied in order
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        region TEXT,
        preferred_store TEXT,
        is_admin INTEGER NOT NULL DEFAULT 0,
        walkthrough_enabled INTEGER NOT NULL DEFAULT 1,
        prefer_metric INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS stores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        logo_url TEXT,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        instructions TEXT NOT NULL,
        prep_time INTEGER NOT NULL DEFAULT 0,
        cook_time INTEGER NOT NULL DEFAULT 0,
        course TEXT NOT NULL,
        servings INTEGER NOT NULL DEFAULT 1,
        image_url TEXT,
        is_vegetarian INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected')),
        user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipe_ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
        position INTEGER NOT NULL,
        quantity TEXT,
        unit TEXT,
        store_section TEXT,
        is_optional INTEGER NOT NULL DEFAULT 0,
        preparation TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipe_stores (
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        store_id INTEGER NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        PRIMARY KEY (recipe_id, store_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS current_preps (
        user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        recipe_ids TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS past_preps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS past_prep_recipes (
        past_prep_id INTEGER NOT NULL REFERENCES past_preps(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        recipe_id INTEGER NOT NULL,
        PRIMARY KEY (past_prep_id, position)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS custom_store_names (
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        store_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        PRIMARY KEY (user_id, store_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
        kind TEXT NOT NULL CHECK (kind IN ('bug', 'feature', 'other')),
        message TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_recipes_status ON recipes(status)",
    "CREATE INDEX IF NOT EXISTS idx_recipes_user ON recipes(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_stores_store ON recipe_stores(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_past_preps_user ON past_preps(user_id)",
];

/// Database handle owning the connection pool
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// In-memory URLs get a single connection so every query sees the same
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { MAX_CONNECTIONS };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            // Closing the only connection would drop the database
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(max_connections, "Database ready");
        Ok(db)
    }

    /// Apply the schema; every statement is idempotent
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        debug!(statements = SCHEMA.len(), "Schema applied");
        Ok(())
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Liveness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Account manager
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Recipe manager
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// Store manager
    #[must_use]
    pub fn stores(&self) -> StoreManager {
        StoreManager::new(self.pool.clone())
    }

    /// Prep manager
    #[must_use]
    pub fn preps(&self) -> PrepManager {
        PrepManager::new(self.pool.clone())
    }

    /// Feedback manager
    #[must_use]
    pub fn feedback(&self) -> FeedbackManager {
        FeedbackManager::new(self.pool.clone())
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp '{raw}': {e}")))
}

/// Non-negative integer column as `u32`
pub(crate) fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
