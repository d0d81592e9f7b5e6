// ABOUTME: Route handler for in-app feedback submissions
// ABOUTME: Stores bug reports, feature requests and other notes from signed-in users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use prepmyweek_core::constants::limits::FEEDBACK_MESSAGE_MAX;
use prepmyweek_core::errors::AppError;
use prepmyweek_core::models::FeedbackRequest;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Feedback routes handler
pub struct FeedbackRoutes;

impl FeedbackRoutes {
    /// Create the feedback route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/feedback", post(Self::handle_submit))
            .with_state(resources)
    }

    /// Handle POST /api/feedback
    async fn handle_submit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<FeedbackRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::missing_field("Message"));
        }
        if message.chars().count() > FEEDBACK_MESSAGE_MAX {
            return Err(AppError::invalid_input(format!(
                "Message must be at most {FEEDBACK_MESSAGE_MAX} characters"
            )));
        }

        let id = resources
            .database
            .feedback()
            .create(auth.user_id, request.kind, message)
            .await?;
        info!(feedback_id = id, kind = request.kind.as_str(), "Feedback received");
        Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Feedback submitted", "id": id })),
        )
            .into_response())
    }
}
