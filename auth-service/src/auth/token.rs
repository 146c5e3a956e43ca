// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token minting and verification.
//!
//! Tokens are stateless: the service keeps no record of issued tokens and
//! holds no revocation list, so a token stays valid until its expiry unless
//! the signing secret is rotated. Verification needs only [`TokenKeys`] and
//! the token itself, never the user store, and is safe to call concurrently.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::AuthError;

/// Token lifetime: 24 hours from issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried by a credential token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Identity the token asserts.
    pub user_id: Uuid,
    /// Username at issuance time.
    pub username: String,
    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,
    /// Expiry timestamp (Unix seconds).
    pub exp: i64,
}

/// HS256 signing and verification keys, built once from the configured
/// secret and shared read-only across all requests.
///
/// Constructed explicitly from configuration and injected into
/// [`crate::state::AppState`]; the secret is never read from ambient
/// global state.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Build keys from the deployment-configured secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // A token is dead the instant its expiry passes.
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint a token for the given identity, expiring 24 hours from now.
    pub fn mint(&self, user_id: Uuid, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.mint_at(user_id, username, Utc::now())
    }

    /// Mint a token with an explicit issuance time.
    ///
    /// Split out from [`TokenKeys::mint`] so expiry behavior is testable
    /// with an injected clock.
    pub fn mint_at(
        &self,
        user_id: Uuid,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Validate a token's signature and expiry and return its claims.
    ///
    /// Every failure maps to the same [`AuthError::InvalidToken`]; the
    /// reason is logged server-side but never surfaced to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_keys() -> TokenKeys {
        TokenKeys::new("test-secret")
    }

    #[test]
    fn mint_then_verify_roundtrips_claims() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let token = keys.mint(user_id, "alice").unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn altering_any_character_invalidates_the_token() {
        let keys = test_keys();
        let token = keys.mint(Uuid::new_v4(), "alice").unwrap();

        let last = token.chars().last().unwrap();
        let replacement = if last == 'A' { 'B' } else { 'A' };
        let mut tampered = token[..token.len() - 1].to_string();
        tampered.push(replacement);
        assert_ne!(token, tampered);

        assert_eq!(keys.verify(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn rewriting_the_payload_breaks_the_signature() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let keys = test_keys();
        let token = keys.mint(Uuid::new_v4(), "alice").unwrap();

        // Swap the username inside the payload without re-signing.
        let parts: Vec<&str> = token.split('.').collect();
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        let forged_payload = payload.replace("alice", "mallory");
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_payload.as_bytes()),
            parts[2]
        );

        assert_eq!(keys.verify(&forged), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_fails_verification() {
        let keys = test_keys();
        let issued = Utc::now() - Duration::hours(25);
        let token = keys.mint_at(Uuid::new_v4(), "alice", issued).unwrap();

        assert_eq!(keys.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_signed_with_a_different_secret_fails() {
        let keys = test_keys();
        let other = TokenKeys::new("rotated-secret");
        let token = other.mint(Uuid::new_v4(), "alice").unwrap();

        assert_eq!(keys.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_fails_verification() {
        let keys = test_keys();
        assert_eq!(keys.verify("garbage"), Err(AuthError::InvalidToken));
    }
}
