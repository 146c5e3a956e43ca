// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`/`Deserialize` and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;

// =============================================================================
// Credential Models
// =============================================================================

/// Credentials submitted to `/api/register` and `/api/login`.
///
/// Both fields default to the empty string so that an absent field and an
/// empty field surface as the same client error rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// Unique username, case-sensitive.
    #[serde(default)]
    pub username: String,
    /// Plaintext password; only its salted hash is ever stored.
    #[serde(default)]
    pub password: String,
}

impl CredentialsRequest {
    /// Reject requests with a missing or empty username or password.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::bad_request("username and password are required"));
        }
        Ok(())
    }
}

/// Public fields of a user identity. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::FromRow)]
pub struct PublicUser {
    /// Server-generated unique identifier.
    pub id: Uuid,
    /// The user's unique username.
    pub username: String,
}

/// Response for POST /api/register.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Public fields of the created identity.
    pub user: PublicUser,
}

/// Response for POST /api/login.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed credential token, valid for 24 hours.
    pub token: String,
}

/// Response for GET /api/verify.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Always `true` on success; failures never reach this type.
    pub valid: bool,
    /// Decoded claims of the verified token.
    pub user: crate::auth::Claims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_populated_credentials() {
        let request = CredentialsRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_username() {
        let request = CredentialsRequest {
            username: String::new(),
            password: "pw1".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validate_rejects_empty_password() {
        let request = CredentialsRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_fields_deserialize_to_empty_strings() {
        let request: CredentialsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_empty());
        assert!(request.password.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn public_user_never_serializes_a_hash() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "username"]);
    }
}
