// ABOUTME: Main library entry point for the PrepMyWeek REST API server
// ABOUTME: Wires configuration, logging, SQLite persistence, JWT auth and the axum routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![deny(unsafe_code)]

//! # `PrepMyWeek` Server
//!
//! REST backend for weekly meal-prep planning: recipe browsing and
//! submission, store listings, saved preps and grocery lists.
//!
//! ## Architecture
//!
//! - **config**: Environment-driven server configuration
//! - **logging**: `tracing` subscriber setup
//! - **database**: `SQLite` pool, schema and per-table managers
//! - **auth**: JWT issuing and verification, bcrypt password hashing
//! - **routes**: axum handlers grouped by domain
//! - **server**: Router assembly, middleware and graceful shutdown
//!
//! Grocery aggregation, unit conversion and ingredient validation live in
//! `prepmyweek-planning`; shared models and errors in `prepmyweek-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use prepmyweek::config::ServerConfig;
//! use prepmyweek::resources::ServerResources;
//! use prepmyweek::server::PrepServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let port = config.http_port;
//!     let resources = ServerResources::connect(config).await?;
//!     PrepServer::new(Arc::new(resources)).run(port).await
//! }
//! ```

/// JWT authentication and password hashing
pub mod auth;

/// Environment configuration
pub mod config;

/// `SQLite` persistence
pub mod database;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared state for route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Server assembly
pub mod server;
