// ABOUTME: Typed async client for the PrepMyWeek REST API
// ABOUTME: Bearer auth, bounded timeouts, and one method per endpoint used by the apps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::error::ClientError;
use crate::sequencer::{Latest, RequestSequencer};
use prepmyweek_core::models::{
    ApiResponse, CurrentPrep, CustomStoreNames, FeedbackRequest, GroceryListRequest, LoginRequest,
    LoginResponse, NewRecipe, PastPrep, PastPrepRequest, RecipeDetail, RecipeIdsRequest,
    RecipeSummary, RegisterRequest, Store, StoreRecipesQuery, UserProfile,
};
use prepmyweek_core::pagination::Page;
use prepmyweek_planning::GroceryListResponse;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Sequencer key shared by every store page fetch
const STORE_RECIPES_RESOURCE: &str = "store-recipes";

/// Connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Settings with default timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `{registered user, message}` returned on sign-up
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
    /// Created account
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomStoresBody {
    personalized_store_names: CustomStoreNames,
}

#[derive(Debug, Deserialize)]
struct ApprovedCount {
    approved: u64,
}

/// Client for the PrepMyWeek REST API
#[derive(Debug, Clone)]
pub struct PrepApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl PrepApiClient {
    /// Build a client with its own connection pool
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the base URL is not http(s).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let http = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ClientError::from_transport(&base_url, e))?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Use `token` for authenticated calls
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or remove the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Current bearer token
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let bytes = self.send_raw(path, builder).await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            endpoint: path.to_owned(),
            reason: e.to_string(),
        })
    }

    async fn send_raw(&self, path: &str, builder: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        debug!(endpoint = path, "Calling PrepMyWeek API");
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::from_transport(path, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(path, e))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            warn!(endpoint = path, status = status.as_u16(), "API call failed");
            return Err(ClientError::from_response(status, &body));
        }
        Ok(bytes.to_vec())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Create an account
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let path = "/api/users";
        self.send(path, self.request(Method::POST, path).json(request))
            .await
    }

    /// Sign in and keep the returned token on this client
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ClientError> {
        let path = "/api/users/login";
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response: LoginResponse = self
            .send(path, self.request(Method::POST, path).json(&body))
            .await?;
        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    /// Profile of the signed-in user
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let path = "/api/users/me";
        self.send(path, self.authed(Method::GET, path)?).await
    }

    /// Toggle walkthrough popups
    pub async fn set_walkthrough(&self, enabled: bool) -> Result<UserProfile, ClientError> {
        let path = "/api/users/walkthrough";
        let body = serde_json::json!({ "enabled": enabled });
        self.send(path, self.authed(Method::PUT, path)?.json(&body))
            .await
    }

    /// Toggle metric display
    pub async fn set_prefer_metric(&self, prefer_metric: bool) -> Result<UserProfile, ClientError> {
        let path = "/api/users/preferences";
        let body = serde_json::json!({ "preferMetric": prefer_metric });
        self.send(path, self.authed(Method::PUT, path)?.json(&body))
            .await
    }

    /// Personalised store names
    pub async fn custom_stores(&self) -> Result<CustomStoreNames, ClientError> {
        let path = "/api/users/custom-stores";
        let body: CustomStoresBody = self.send(path, self.authed(Method::GET, path)?).await?;
        Ok(body.personalized_store_names)
    }

    /// Replace personalised store names
    pub async fn set_custom_stores(
        &self,
        names: CustomStoreNames,
    ) -> Result<CustomStoreNames, ClientError> {
        let path = "/api/users/custom-stores";
        let body = CustomStoresBody {
            personalized_store_names: names,
        };
        let body: CustomStoresBody = self
            .send(path, self.authed(Method::PUT, path)?.json(&body))
            .await?;
        Ok(body.personalized_store_names)
    }

    /// Delete the signed-in account and forget the token
    pub async fn delete_account(&mut self) -> Result<(), ClientError> {
        let path = "/api/users/delete-account";
        self.send_raw(path, self.authed(Method::DELETE, path)?)
            .await?;
        self.token = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Recipes and stores
    // ------------------------------------------------------------------

    /// Approved recipes
    pub async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ClientError> {
        let path = "/api/recipes";
        let body: ApiResponse<Vec<RecipeSummary>> =
            self.send(path, self.request(Method::GET, path)).await?;
        Ok(body.data)
    }

    /// Fetch recipes into `slot`, discarding the result if a newer fetch started meanwhile
    ///
    /// Returns `Ok(false)` when the result was stale and dropped.
    pub async fn refresh_recipes(
        &self,
        slot: &Latest<Vec<RecipeSummary>>,
    ) -> Result<bool, ClientError> {
        let ticket = slot.begin();
        let recipes = self.list_recipes().await?;
        Ok(slot.resolve(ticket, recipes))
    }

    /// Recipe detail, optionally converted to metric
    pub async fn get_recipe(&self, id: i64, prefer_metric: bool) -> Result<RecipeDetail, ClientError> {
        let path = format!("/api/recipes/{id}");
        let body: ApiResponse<RecipeDetail> = self
            .send(
                &path,
                self.request(Method::GET, &path)
                    .query(&[("preferMetric", prefer_metric)]),
            )
            .await?;
        Ok(body.data)
    }

    /// Submit a recipe for moderation
    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<RecipeDetail, ClientError> {
        let path = "/api/recipes";
        let body: ApiResponse<RecipeDetail> = self
            .send(path, self.authed(Method::POST, path)?.json(recipe))
            .await?;
        Ok(body.data)
    }

    /// Replace one of the user's recipes
    pub async fn update_recipe(&self, id: i64, recipe: &NewRecipe) -> Result<RecipeDetail, ClientError> {
        let path = format!("/api/recipes/{id}");
        let body: ApiResponse<RecipeDetail> = self
            .send(&path, self.authed(Method::PUT, &path)?.json(recipe))
            .await?;
        Ok(body.data)
    }

    /// Delete one of the user's recipes
    pub async fn delete_recipe(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/api/recipes/{id}");
        self.send_raw(&path, self.authed(Method::DELETE, &path)?)
            .await?;
        Ok(())
    }

    /// All grocery stores
    pub async fn list_stores(&self) -> Result<Vec<Store>, ClientError> {
        let path = "/api/stores";
        self.send(path, self.request(Method::GET, path)).await
    }

    /// One page of approved recipes linked to a store
    pub async fn store_recipes(
        &self,
        store_id: i64,
        query: &StoreRecipesQuery,
    ) -> Result<Page<RecipeSummary>, ClientError> {
        let path = format!("/api/stores/{store_id}/recipes");
        self.send(&path, self.request(Method::GET, &path).query(query))
            .await
    }

    /// Store page fetch sequenced against other store page fetches
    ///
    /// Returns `None` when a newer store page request was issued on
    /// `sequencer` while this one was in flight.
    pub async fn store_recipes_latest(
        &self,
        sequencer: &RequestSequencer,
        store_id: i64,
        query: &StoreRecipesQuery,
    ) -> Result<Option<Page<RecipeSummary>>, ClientError> {
        let ticket = sequencer.issue(STORE_RECIPES_RESOURCE);
        let page = self.store_recipes(store_id, query).await?;
        if sequencer.is_current(&ticket) {
            Ok(Some(page))
        } else {
            debug!(store_id, ticket = ticket.id(), "Discarding stale store page");
            Ok(None)
        }
    }

    // ------------------------------------------------------------------
    // Preps
    // ------------------------------------------------------------------

    /// The saved working prep
    pub async fn current_prep(&self) -> Result<CurrentPrep, ClientError> {
        let path = "/api/current-prep";
        self.send(path, self.authed(Method::GET, path)?).await
    }

    /// Overwrite the working prep
    pub async fn save_current_prep(&self, recipe_ids: &[i64]) -> Result<CurrentPrep, ClientError> {
        let path = "/api/current-prep";
        let body = RecipeIdsRequest {
            recipe_ids: recipe_ids.to_vec(),
        };
        self.send(path, self.authed(Method::POST, path)?.json(&body))
            .await
    }

    /// Past preps, newest first
    pub async fn past_preps(&self) -> Result<Vec<PastPrep>, ClientError> {
        let path = "/api/past-preps";
        self.send(path, self.authed(Method::GET, path)?).await
    }

    /// One past prep
    pub async fn past_prep(&self, id: i64) -> Result<PastPrep, ClientError> {
        let path = format!("/api/past-preps/{id}");
        self.send(&path, self.authed(Method::GET, &path)?).await
    }

    /// Append a finalized prep to the history
    pub async fn save_past_prep(&self, name: &str, recipe_ids: &[i64]) -> Result<PastPrep, ClientError> {
        let path = "/api/past-preps";
        let body = PastPrepRequest {
            name: name.to_owned(),
            recipe_ids: recipe_ids.to_vec(),
        };
        self.send(path, self.authed(Method::POST, path)?.json(&body))
            .await
    }

    /// Grocery list for the given recipes
    pub async fn grocery_list(
        &self,
        recipe_ids: &[i64],
        prefer_metric: bool,
    ) -> Result<GroceryListResponse, ClientError> {
        let path = "/api/grocery-list";
        let body = GroceryListRequest {
            recipe_ids: recipe_ids.to_vec(),
            prefer_metric,
        };
        self.send(path, self.authed(Method::POST, path)?.json(&body))
            .await
    }

    /// Send feedback
    pub async fn send_feedback(&self, feedback: &FeedbackRequest) -> Result<(), ClientError> {
        let path = "/api/feedback";
        self.send_raw(path, self.authed(Method::POST, path)?.json(feedback))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Moderation
    // ------------------------------------------------------------------

    /// Recipes awaiting review
    pub async fn pending_recipes(&self) -> Result<Vec<RecipeSummary>, ClientError> {
        let path = "/api/admin/recipes/pending";
        let body: ApiResponse<Vec<RecipeSummary>> =
            self.send(path, self.authed(Method::GET, path)?).await?;
        Ok(body.data)
    }

    /// Approve several recipes; returns how many changed status
    pub async fn approve_recipes(&self, recipe_ids: &[i64]) -> Result<u64, ClientError> {
        let path = "/api/admin/recipes/approve-multiple";
        let body = RecipeIdsRequest {
            recipe_ids: recipe_ids.to_vec(),
        };
        let count: ApprovedCount = self
            .send(path, self.authed(Method::PUT, path)?.json(&body))
            .await?;
        Ok(count.approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = PrepApiClient::new(&ClientConfig::new("ftp://example.com"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = PrepApiClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_authed_call_without_token_fails_fast() {
        let client = PrepApiClient::new(&ClientConfig::new("http://localhost:9")).unwrap();
        let result = client.current_prep().await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }
}
