// ABOUTME: Route handlers for account registration, login and user preferences
// ABOUTME: Issues JWTs at login and serves the signed-in user's profile and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! User routes
//!
//! Registration and login are public; everything else requires a bearer
//! token and acts on the token's user.

use crate::database::NewUser;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::{
    CustomStoreNames, LoginRequest, LoginResponse, RegisterRequest, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// `PUT /api/users/walkthrough`
#[derive(Debug, Deserialize)]
pub struct WalkthroughRequest {
    /// Show walkthrough popups
    pub enabled: bool,
}

/// `PUT /api/users/preferences`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    /// Show quantities in metric units
    pub prefer_metric: bool,
}

/// Body of `GET` and `PUT /api/users/custom-stores`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStoresBody {
    /// Store id to personalised name
    #[serde(default)]
    pub personalized_store_names: CustomStoreNames,
}

/// Response for a successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: &'static str,
    /// The created account
    pub user: UserProfile,
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_register))
            .route("/api/users/login", post(Self::handle_login))
            .route("/api/users/me", get(Self::handle_me))
            .route("/api/users/walkthrough", put(Self::handle_walkthrough))
            .route("/api/users/preferences", put(Self::handle_preferences))
            .route(
                "/api/users/custom-stores",
                get(Self::handle_get_custom_stores).put(Self::handle_set_custom_stores),
            )
            .route("/api/users/delete-account", delete(Self::handle_delete_account))
            .with_state(resources)
    }

    /// Load the caller's profile or fail with 404 if the account is gone
    async fn profile(resources: &ServerResources, user_id: i64) -> Result<UserProfile, AppError> {
        resources
            .database
            .users()
            .profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Handle POST /api/users - Create an account
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        let name = request.name.trim().to_owned();
        if email.is_empty() {
            return Err(AppError::missing_field("Email"));
        }
        if !email.contains('@') {
            return Err(AppError::invalid_input("Invalid email address"));
        }
        if name.is_empty() {
            return Err(AppError::missing_field("Name"));
        }
        if request.password.is_empty() {
            return Err(AppError::missing_field("Password"));
        }

        let password_hash = resources
            .auth_manager
            .hash_password(&request.password)
            .await?;
        let user = resources
            .database
            .users()
            .create(&NewUser {
                email,
                name,
                password_hash,
                region: request.region.filter(|r| !r.trim().is_empty()),
                preferred_store: request.preferred_store.filter(|s| !s.trim().is_empty()),
            })
            .await?;
        info!(user_id = user.id, "User registered");

        let response = RegisterResponse {
            message: "User created successfully",
            user: user.into_profile(Vec::new()),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/users/login - Exchange credentials for a token
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let invalid = || AppError::auth_invalid("Invalid email or password");
        let email = request.email.trim().to_lowercase();

        let user = resources
            .database
            .users()
            .get_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !resources
            .auth_manager
            .verify_password(&request.password, &user.password_hash)
            .await?
        {
            return Err(invalid());
        }

        let token = resources.auth_manager.generate_token(&user)?;
        info!(user_id = user.id, "User logged in");
        Ok((StatusCode::OK, Json(LoginResponse { token })).into_response())
    }

    /// Handle GET /api/users/me - Profile of the signed-in user
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let profile = Self::profile(&resources, auth.user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT /api/users/walkthrough
    async fn handle_walkthrough(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<WalkthroughRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .database
            .users()
            .set_walkthrough(auth.user_id, request.enabled)
            .await?;
        let profile = Self::profile(&resources, auth.user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT /api/users/preferences
    async fn handle_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<PreferencesRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .database
            .users()
            .set_prefer_metric(auth.user_id, request.prefer_metric)
            .await?;
        let profile = Self::profile(&resources, auth.user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /api/users/custom-stores
    async fn handle_get_custom_stores(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let names = resources
            .database
            .users()
            .custom_store_names(auth.user_id)
            .await?;
        let body = CustomStoresBody {
            personalized_store_names: names,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle PUT /api/users/custom-stores - Replace personalised names
    async fn handle_set_custom_stores(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CustomStoresBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let kept = resources
            .database
            .users()
            .set_custom_store_names(auth.user_id, &request.personalized_store_names)
            .await?;
        let body = CustomStoresBody {
            personalized_store_names: kept,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle DELETE /api/users/delete-account
    async fn handle_delete_account(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        if !resources.database.users().delete(auth.user_id).await? {
            return Err(AppError::not_found("User"));
        }
        info!(user_id = auth.user_id, "Account deleted");
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Account deleted successfully" })),
        )
            .into_response())
    }
}
