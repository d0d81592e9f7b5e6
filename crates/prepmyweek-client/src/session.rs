// ABOUTME: Signed-in user session owning the API client and prep selection state
// ABOUTME: Created at sign-in, consumed at sign-out; screens borrow it instead of reading globals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::client::{ClientConfig, PrepApiClient};
use crate::error::ClientError;
use crate::sequencer::{Latest, RequestSequencer};
use prepmyweek_core::models::{PastPrep, RecipeSummary, StoreRecipesQuery, UserProfile};
use prepmyweek_core::pagination::Page;
use prepmyweek_planning::{GroceryListResponse, PrepConfig, PrepSelection};
use tracing::info;

/// Session state for one signed-in user
#[derive(Debug)]
pub struct Session {
    client: PrepApiClient,
    profile: UserProfile,
    selection: PrepSelection,
    recipes: Latest<Vec<RecipeSummary>>,
    requests: RequestSequencer,
}

impl Session {
    /// Sign in and load the profile
    ///
    /// # Errors
    ///
    /// Returns the login or profile error; no session is created on failure.
    pub async fn sign_in(
        config: &ClientConfig,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let mut client = PrepApiClient::new(config)?;
        client.login(email, password).await?;
        let profile = client.me().await?;
        info!(user_id = profile.id, "Session started");

        Ok(Self {
            client,
            profile,
            selection: PrepSelection::default(),
            recipes: Latest::new(),
            requests: RequestSequencer::new(),
        })
    }

    /// Signed-in user
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Underlying API client
    #[must_use]
    pub const fn client(&self) -> &PrepApiClient {
        &self.client
    }

    /// Current prep selection
    #[must_use]
    pub const fn selection(&self) -> &PrepSelection {
        &self.selection
    }

    /// Mutable prep selection for add/remove actions
    pub fn selection_mut(&mut self) -> &mut PrepSelection {
        &mut self.selection
    }

    /// Start a new prep with `config`, dropping any previous selection
    pub fn start_prep(&mut self, config: PrepConfig) {
        self.selection.clear_prep();
        self.selection.set_config(config);
    }

    /// Last recipe listing that was not overtaken by a newer fetch
    #[must_use]
    pub fn recipes(&self) -> Option<Vec<RecipeSummary>> {
        self.recipes.get()
    }

    /// Refetch the recipe listing; stale results are dropped
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous listing is kept.
    pub async fn refresh_recipes(&self) -> Result<bool, ClientError> {
        self.client.refresh_recipes(&self.recipes).await
    }

    /// One page of a store's recipes, `None` if a newer store page was requested meanwhile
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn store_recipes(
        &self,
        store_id: i64,
        query: &StoreRecipesQuery,
    ) -> Result<Option<Page<RecipeSummary>>, ClientError> {
        self.client
            .store_recipes_latest(&self.requests, store_id, query)
            .await
    }

    /// Replace the selection with the server's saved current prep
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the selection is left as it was.
    pub async fn restore_current_prep(&mut self) -> Result<usize, ClientError> {
        let saved = self.client.current_prep().await?;
        let config = *self.selection.config();
        self.selection.clear_prep();
        self.selection.set_config(config);
        for recipe in saved.recipes {
            self.selection.select(recipe.summary);
        }
        Ok(self.selection.recipes().len())
    }

    /// Save the selection as the current prep
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub async fn save_current_prep(&self) -> Result<(), ClientError> {
        self.client
            .save_current_prep(&self.selection.recipe_ids())
            .await?;
        Ok(())
    }

    /// Grocery list for everything selected
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn grocery_list(&self) -> Result<GroceryListResponse, ClientError> {
        self.client
            .grocery_list(&self.selection.recipe_ids(), self.profile.prefer_metric)
            .await
    }

    /// Append the selection to the prep history, then clear it
    ///
    /// # Errors
    ///
    /// Returns the save error; the selection is kept so the user can retry.
    pub async fn finalize_prep(&mut self, name: &str) -> Result<PastPrep, ClientError> {
        let past = self
            .client
            .save_past_prep(name, &self.selection.recipe_ids())
            .await?;
        self.selection.clear_prep();
        Ok(past)
    }

    /// Tear the session down, discarding unsaved selection state
    pub fn sign_out(mut self) {
        self.selection.clear_prep();
        self.recipes.clear();
        self.requests.reset();
        self.client.set_token(None);
        info!(user_id = self.profile.id, "Session ended");
    }
}
