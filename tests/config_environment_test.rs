// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Mutates process environment variables, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use prepmyweek::config::{Environment, ServerConfig};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "HTTP_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "BCRYPT_COST",
    "CORS_ALLOWED_ORIGINS",
    "REQUEST_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_in_development() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.database_url, "sqlite:./data/prepmyweek.db");
    assert_eq!(config.auth.jwt_expiry_hours, 168);
    assert_eq!(config.auth.bcrypt_cost, 10);
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.auth.jwt_secret.len(), 64);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("HTTP_PORT", "8088");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "from-env");
    env::set_var("JWT_EXPIRY_HOURS", "24");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://prepmyweek.app");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8088);
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.auth.jwt_secret, "from-env");
    assert_eq!(config.auth.jwt_expiry_hours, 24);
    assert_eq!(config.cors.allowed_origins, "https://prepmyweek.app");

    clear_env();
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("JWT_SECRET", "prod-secret");
    let config = ServerConfig::from_env().unwrap();
    assert!(config.environment.is_production());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("BCRYPT_COST", "2");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("JWT_EXPIRY_HOURS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}
