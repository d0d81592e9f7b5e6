// ABOUTME: Async HTTP client for the PrepMyWeek REST API
// ABOUTME: Typed endpoints, stale-response discarding, and an explicit user session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

#![deny(unsafe_code)]

//! # `PrepMyWeek` Client
//!
//! Used by native front-ends and integration tooling. Every call has a bounded
//! timeout and reports failure as a [`ClientError`] value; nothing is retried.
//! Fetches that race are sequenced with [`RequestSequencer`] or [`Latest`] so
//! an older response never overwrites a newer one.

/// Typed REST client
pub mod client;
/// Client error type
pub mod error;
/// Request sequencing
pub mod sequencer;
/// User session lifecycle
pub mod session;

pub use client::{ClientConfig, PrepApiClient, RegisterResponse};
pub use error::ClientError;
pub use sequencer::{Latest, LatestTicket, RequestSequencer, RequestTicket};
pub use session::Session;
