// ABOUTME: Success envelope used by the recipe endpoints
// ABOUTME: Serializes as {"success": true, "data": ...}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use serde::{Deserialize, Serialize};

/// `{success, data}` wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` on this type; failures use `ErrorResponse`
    pub success: bool,
    /// Payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a successful payload
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
