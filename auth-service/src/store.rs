// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Store
//!
//! PostgreSQL-backed user records behind a bounded connection pool. All
//! queries are parameterized; usernames and hashes are never interpolated
//! into SQL. Uniqueness of `username` is enforced by the table's own
//! constraint, which stays correct across concurrent registrations and
//! multiple service instances.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PublicUser;

/// A full user row, including the password hash. Only ever handled inside
/// the service; API responses use [`PublicUser`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username uniqueness invariant would be violated.
    #[error("username already exists")]
    UsernameTaken,
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository over the shared connection pool.
///
/// Each call checks a connection out of the pool for its own duration and
/// returns it on every exit path.
pub struct UserStore<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return its public fields.
    ///
    /// A unique-constraint violation maps to [`StoreError::UsernameTaken`]
    /// so callers can tell "already exists" from a malformed request or a
    /// store fault.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<PublicUser, StoreError> {
        let user = sqlx::query_as::<_, PublicUser>(
            "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::UsernameTaken;
                }
            }
            StoreError::Database(e)
        })?;

        Ok(user)
    }

    /// Look up a user by exact (case-sensitive) username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool)
            .await?;

        Ok(record)
    }

    /// Cheap round-trip used by the health endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_conflict_distinct_from_faults() {
        let taken = StoreError::UsernameTaken;
        assert_eq!(taken.to_string(), "username already exists");

        let fault = StoreError::Database(sqlx::Error::PoolClosed);
        assert!(fault.to_string().starts_with("database error"));
    }
}
