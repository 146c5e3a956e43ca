// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification (bcrypt).
//!
//! bcrypt's work factor is tuned so a single hash costs tens of
//! milliseconds; both operations run on the blocking thread pool to keep
//! the async executor responsive. The comparison in [`verify_password`] is
//! the library's own constant-time check relative to the stored hash; no
//! custom comparator is ever used.

use bcrypt::DEFAULT_COST;
use tokio::task;

/// Password hashing failure.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The blocking hashing task was cancelled or panicked.
    #[error("hashing task failed to complete")]
    TaskJoin,
    /// bcrypt rejected the input or produced an invalid hash.
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Derive a salted bcrypt hash (cost 10) of the given password.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || bcrypt::hash(password, DEFAULT_COST))
        .await
        .map_err(|_| PasswordError::TaskJoin)?
        .map_err(PasswordError::from)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` for a well-formed hash that does not match; errors
/// only when the stored hash itself is unparseable.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| PasswordError::TaskJoin)?
        .map_err(PasswordError::from)
}
