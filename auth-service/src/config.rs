// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the service. Configuration is loaded from the environment
//! once at startup; there is no hot reload.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8001` |
//! | `DB_HOST` | PostgreSQL host | `db` |
//! | `DB_PORT` | PostgreSQL port | `5432` |
//! | `DB_USER` | PostgreSQL user | `postgres` |
//! | `DB_PASSWORD` | PostgreSQL password | `postgres` |
//! | `DB_NAME` | PostgreSQL database name | `expenses` |
//! | `JWT_SECRET` | Token signing secret | `supersecret` (dev fallback) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the PostgreSQL host.
pub const DB_HOST_ENV: &str = "DB_HOST";

/// Environment variable name for the PostgreSQL port.
pub const DB_PORT_ENV: &str = "DB_PORT";

/// Environment variable name for the PostgreSQL user.
pub const DB_USER_ENV: &str = "DB_USER";

/// Environment variable name for the PostgreSQL password.
pub const DB_PASSWORD_ENV: &str = "DB_PASSWORD";

/// Environment variable name for the PostgreSQL database name.
pub const DB_NAME_ENV: &str = "DB_NAME";

/// Environment variable name for the token signing secret.
///
/// The secret is read once here and injected into [`crate::auth::TokenKeys`]
/// at construction time; nothing else reads it from the environment.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default server bind port.
pub const DEFAULT_PORT: u16 = 8001;

/// Maximum number of pooled PostgreSQL connections.
///
/// Each request checks a connection out of the pool for its own lifetime
/// and returns it on every exit path; acquisition may block briefly under
/// load.
pub const DB_POOL_SIZE: u32 = 5;

/// Resolved service configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// PostgreSQL connection URL assembled from the `DB_*` variables.
    pub database_url: String,
    /// Token signing secret.
    pub jwt_secret: String,
}

impl Config {
    /// Read configuration from the environment, applying defaults.
    pub fn from_env() -> Self {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_host = env::var(DB_HOST_ENV).unwrap_or_else(|_| "db".to_string());
        let db_port = env::var(DB_PORT_ENV).unwrap_or_else(|_| "5432".to_string());
        let db_user = env::var(DB_USER_ENV).unwrap_or_else(|_| "postgres".to_string());
        let db_password = env::var(DB_PASSWORD_ENV).unwrap_or_else(|_| "postgres".to_string());
        let db_name = env::var(DB_NAME_ENV).unwrap_or_else(|_| "expenses".to_string());

        let database_url =
            format!("postgres://{db_user}:{db_password}@{db_host}:{db_port}/{db_name}");

        let jwt_secret = env::var(JWT_SECRET_ENV).unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development fallback secret");
            "supersecret".to_string()
        });

        Self {
            host,
            port,
            database_url,
            jwt_secret,
        }
    }
}
