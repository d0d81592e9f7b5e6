// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Request id generation, request spans, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{make_request_span, RequestIdGenerator, REQUEST_ID_HEADER};
