// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenKeys;

/// Shared application state.
///
/// Both pieces are read-mostly and cheap to clone: the pool hands out
/// connections internally and the signing keys are never mutated after
/// startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// Bounded PostgreSQL connection pool.
    pub db: PgPool,
    /// Token signing and verification keys.
    pub keys: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: PgPool, keys: TokenKeys) -> Self {
        Self {
            db,
            keys: Arc::new(keys),
        }
    }
}
