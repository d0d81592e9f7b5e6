// ABOUTME: Configuration module for the PrepMyWeek REST server
// ABOUTME: Environment-only configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

/// Environment variable parsing and the server configuration type
pub mod environment;

pub use environment::{AuthConfig, CorsConfig, Environment, ServerConfig};
