// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Issues HS256 bearer tokens at login and resolves them to an authenticated user per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Authentication
//!
//! Tokens carry `userId`, `email` and `isAdmin` claims and expire after the
//! configured number of hours. A request without a bearer token is rejected
//! with 401; a token that fails verification is rejected with 403.

use crate::config::AuthConfig;
use crate::database::UserRecord;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use prepmyweek_core::constants::service_names;
use prepmyweek_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User id
    pub user_id: i64,
    /// User email
    pub email: String,
    /// Moderator flag at issue time
    pub is_admin: bool,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience
    pub aud: String,
}

/// Caller resolved from a valid bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// User id
    pub user_id: i64,
    /// User email
    pub email: String,
    /// Moderator flag from the token
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

/// Token issuing and verification plus password hashing
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
    bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("expiry_hours", &self.expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a new auth manager from configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours: config.jwt_expiry_hours,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[service_names::API_AUDIENCE]);
        validation
    }

    /// Issue a token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn generate_token(&self, user: &UserRecord) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            aud: service_names::API_AUDIENCE.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` (403) for a bad signature, wrong audience,
    /// expiry, or malformed token.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AppError::auth_expired()
            })
    }

    /// Resolve the caller from the `Authorization: Bearer` header
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` (401) when no token is present and
    /// `AUTH_EXPIRED` (403) when it does not verify.
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthUser> {
        let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;
        self.validate_token(token).map(AuthUser::from)
    }

    /// Hash a password off the async executor
    ///
    /// # Errors
    ///
    /// Returns an internal error if hashing fails.
    pub async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Check a password against a stored hash; malformed hashes never match
    ///
    /// # Errors
    ///
    /// Returns an internal error if the blocking task fails.
    pub async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }
}

/// Token from `Authorization: Bearer <token>`, if present and non-empty
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::http::HeaderValue;

    fn user(is_admin: bool) -> UserRecord {
        UserRecord {
            id: 7,
            email: "cook@example.com".to_owned(),
            name: "Cook".to_owned(),
            password_hash: String::new(),
            region: None,
            preferred_store: None,
            is_admin,
            walkthrough_enabled: true,
            prefer_metric: false,
            created_at: Utc::now(),
        }
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_round_trip_carries_claims() {
        let auth = AuthManager::new(&ServerConfig::for_testing().auth);
        let token = auth.generate_token(&user(true)).unwrap();

        let caller = auth.authenticate(&headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(caller.user_id, 7);
        assert!(caller.is_admin);
    }

    #[test]
    fn test_missing_and_invalid_tokens() {
        let auth = AuthManager::new(&ServerConfig::for_testing().auth);

        let missing = auth.authenticate(&HeaderMap::new()).unwrap_err();
        assert_eq!(missing.http_status(), 401);
        assert_eq!(missing.message, "Access token missing");

        let bare = auth.authenticate(&headers("Bearer ")).unwrap_err();
        assert_eq!(bare.http_status(), 401);

        let forged = auth.authenticate(&headers("Bearer not.a.token")).unwrap_err();
        assert_eq!(forged.http_status(), 403);
        assert_eq!(forged.message, "Invalid or expired token");
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let mut config = ServerConfig::for_testing().auth;
        let token = AuthManager::new(&config).generate_token(&user(false)).unwrap();
        config.jwt_secret = "another-secret".to_owned();

        let err = AuthManager::new(&config).validate_token(&token).unwrap_err();
        assert_eq!(err.http_status(), 403);
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let auth = AuthManager::new(&ServerConfig::for_testing().auth);
        let hash = auth.hash_password("correct-horse").await.unwrap();

        assert!(auth.verify_password("correct-horse", &hash).await.unwrap());
        assert!(!auth.verify_password("wrong", &hash).await.unwrap());
        assert!(!auth.verify_password("x", "not-a-hash").await.unwrap());
    }
}
