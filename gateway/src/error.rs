// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway errors.
//!
//! These cover only the gateway's own failures. A backend that answers
//! with an error status is not a gateway failure: its response is relayed
//! verbatim and never reaches this type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Gateway-level failure.
#[derive(Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// No configured prefix matched the request path
    NoRoute,
    /// The inbound request body could not be read
    Body,
    /// The backend could not be reached
    UpstreamUnreachable,
    /// The backend did not answer within the upstream timeout
    UpstreamTimeout,
    /// The backend's response body could not be read
    UpstreamBody,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl GatewayError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NoRoute => StatusCode::NOT_FOUND,
            GatewayError::Body => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnreachable | GatewayError::UpstreamBody => {
                StatusCode::BAD_GATEWAY
            }
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::NoRoute => write!(f, "no route matched"),
            GatewayError::Body => write!(f, "failed to read request body"),
            GatewayError::UpstreamUnreachable => write!(f, "upstream service unreachable"),
            GatewayError::UpstreamTimeout => write!(f, "upstream service timed out"),
            GatewayError::UpstreamBody => write!(f, "failed to read upstream response"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
