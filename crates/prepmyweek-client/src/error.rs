// ABOUTME: Error type for PrepMyWeek API client calls
// ABOUTME: Separates transport failures, timeouts, auth rejections, and API errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use prepmyweek_core::errors::ErrorResponse;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API call; the caller's state is left untouched
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request did not finish within the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout {
        /// Endpoint path
        endpoint: String,
    },

    /// Connection or transport failure
    #[error("Network error calling {endpoint}: {source}")]
    Network {
        /// Endpoint path
        endpoint: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Call needs a token and none is set
    #[error("Not signed in")]
    NotAuthenticated,

    /// Server rejected the credentials (401) or token (403)
    #[error("{message}")]
    Unauthorized {
        /// HTTP status
        status: u16,
        /// Server message
        message: String,
    },

    /// Resource does not exist
    #[error("{message}")]
    NotFound {
        /// Server message
        message: String,
    },

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status
        status: u16,
        /// Server message
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Parse failure
        reason: String,
    },

    /// Base URL or path could not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classify a transport error
    #[must_use]
    pub fn from_transport(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_owned(),
            }
        } else {
            Self::Network {
                endpoint: endpoint.to_owned(),
                source,
            }
        }
    }

    /// Classify a non-success response from its status and body
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .or_else(|_| {
                serde_json::from_str::<serde_json::Value>(body).map(|v| {
                    v.get("error")
                        .and_then(serde_json::Value::as_str)
                        .map_or_else(|| body.to_owned(), str::to_owned)
                })
            })
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_owned()
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether signing in again could fix this
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized { .. })
    }
}
