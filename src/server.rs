// ABOUTME: HTTP server assembly for the PrepMyWeek API
// ABOUTME: Merges domain routers, applies tracing, request-id, timeout, body-limit and CORS layers, and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::middleware::{make_request_span, setup_cors, RequestIdGenerator, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{
    AdminRoutes, FeedbackRoutes, GroceryRoutes, HealthRoutes, PrepRoutes, RecipeRoutes,
    StoreRoutes, UserRoutes,
};
use anyhow::{Context, Result};
use axum::{body::Body, http::HeaderName, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Largest accepted request body
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// The REST API server
pub struct PrepServer {
    resources: Arc<ServerResources>,
}

impl PrepServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources
    #[must_use]
    pub const fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// All API routes without middleware
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(UserRoutes::routes(resources.clone()))
            .merge(RecipeRoutes::routes(resources.clone()))
            .merge(StoreRoutes::routes(resources.clone()))
            .merge(PrepRoutes::routes(resources.clone()))
            .merge(GroceryRoutes::routes(resources.clone()))
            .merge(AdminRoutes::routes(resources.clone()))
            .merge(FeedbackRoutes::routes(resources.clone()))
    }

    /// The full application: routes wrapped in the middleware stack
    pub fn router(&self) -> Router {
        let config = &self.resources.config;
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        Self::routes(&self.resources)
            .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(SetRequestIdLayer::new(request_id, RequestIdGenerator))
            .layer(setup_cors(config))
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails.
    pub async fn run(self, port: u16) -> Result<()> {
        let address = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;
        info!(%address, "PrepMyWeek API listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
