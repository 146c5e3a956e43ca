// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential endpoints: register, login, verify.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::{
    auth::{bearer_token, password, AuthError},
    error::ApiError,
    models::{CredentialsRequest, RegisterResponse, TokenResponse, VerifyResponse},
    state::AppState,
    store::{StoreError, UserStore},
};

/// The single undifferentiated login failure.
///
/// Unknown username and wrong password produce this same value so the
/// response never reveals which check failed.
fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("invalid credentials")
}

/// Map a registration store failure to its API error.
fn register_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::UsernameTaken => ApiError::bad_request("username already exists"),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "user insert failed");
            ApiError::internal("user store unavailable")
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Credentials",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Missing fields or username already exists"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let hash = password::hash_password(request.password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            ApiError::internal("failed to process credentials")
        })?;

    let user = UserStore::new(&state.db)
        .create_user(&request.username, &hash)
        .await
        .map_err(register_store_error)?;

    tracing::info!(username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user created".to_string(),
            user,
        }),
    ))
}

/// Authenticate a user and mint a credential token.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Credentials",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request.validate()?;

    let user = UserStore::new(&state.db)
        .find_by_username(&request.username)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "user lookup failed");
            ApiError::internal("user store unavailable")
        })?;

    let Some(user) = user else {
        return Err(invalid_credentials());
    };

    let matches = password::verify_password(request.password, user.password_hash)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password verification failed");
            ApiError::internal("failed to process credentials")
        })?;

    if !matches {
        return Err(invalid_credentials());
    }

    let token = state.keys.mint(user.id, &user.username).map_err(|e| {
        tracing::error!(error = %e, "token signing failed");
        ApiError::internal("failed to issue token")
    })?;

    Ok(Json(TokenResponse { token }))
}

/// Verify a credential token from the `Authorization` header.
///
/// Pure and stateless: touches the signing keys only, never the store.
#[utoipa::path(
    get,
    path = "/api/verify",
    tag = "Credentials",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, AuthError> {
    let token = bearer_token(&headers)?;
    let claims = state.keys.verify(token)?;

    Ok(Json(VerifyResponse {
        valid: true,
        user: claims,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKeys;
    use uuid::Uuid;

    #[test]
    fn unknown_user_and_wrong_password_fail_identically() {
        // Both login failure paths construct the same error: same status,
        // same message, same response shape.
        let unknown_user = invalid_credentials();
        let wrong_password = invalid_credentials();
        assert_eq!(unknown_user.status, wrong_password.status);
        assert_eq!(unknown_user.message, wrong_password.message);
        assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn duplicate_username_is_distinct_from_a_store_fault() {
        let conflict = register_store_error(StoreError::UsernameTaken);
        assert_eq!(conflict.status, StatusCode::BAD_REQUEST);
        assert_eq!(conflict.message, "username already exists");

        let fault = register_store_error(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(fault.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(fault.message, conflict.message);
    }

    #[test]
    fn conflict_and_missing_fields_are_distinguishable() {
        let conflict = register_store_error(StoreError::UsernameTaken);
        let missing = CredentialsRequest {
            username: String::new(),
            password: String::new(),
        }
        .validate()
        .unwrap_err();

        // Same status per the HTTP surface, but callers can tell them apart.
        assert_eq!(conflict.status, missing.status);
        assert_ne!(conflict.message, missing.message);
    }

    #[tokio::test]
    async fn registered_credentials_authenticate_and_decode_to_the_username() {
        // Register-then-login composed from the same layers the handlers
        // use: hash, verify, mint, verify token.
        let keys = TokenKeys::new("test-secret");
        let user_id = Uuid::new_v4();

        let stored_hash = password::hash_password("pw1".to_string()).await.unwrap();
        assert!(password::verify_password("pw1".to_string(), stored_hash.clone())
            .await
            .unwrap());

        let token = keys.mint(user_id, "alice").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_id, user_id);
    }
}
