// ABOUTME: Shared server state handed to every route handler
// ABOUTME: Bundles the database, the auth manager and the loaded configuration behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::auth::{AuthManager, AuthUser};
use crate::config::ServerConfig;
use crate::database::{Database, UserRecord};
use axum::http::HeaderMap;
use prepmyweek_core::errors::{AppError, AppResult};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone, Debug)]
pub struct ServerResources {
    /// Database handle
    pub database: Arc<Database>,
    /// Token and password handling
    pub auth_manager: Arc<AuthManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(&config.auth);
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }

    /// Connect the database named by `config` and build resources
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn connect(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database_url).await?;
        Ok(Self::new(database, config))
    }

    /// Authenticate the caller from request headers
    ///
    /// # Errors
    ///
    /// Returns 401 without a token and 403 for an invalid one.
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthUser> {
        self.auth_manager.authenticate(headers)
    }

    /// Authenticate and require the moderator flag as currently stored
    ///
    /// # Errors
    ///
    /// Returns 401/403 for authentication failures and 403 for non-admins.
    pub async fn require_admin(&self, headers: &HeaderMap) -> AppResult<UserRecord> {
        let caller = self.authenticate(headers)?;
        self.database
            .users()
            .get_by_id(caller.user_id)
            .await?
            .filter(|user| user.is_admin)
            .ok_or_else(|| AppError::permission_denied("Admin access required"))
    }
}
