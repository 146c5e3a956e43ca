// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the gateway. Configuration is loaded from the environment once at
//! startup; the route table built from it is immutable for the process
//! lifetime.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_SERVICE_URL` | Auth service base URL | `http://auth-service:8001` |
//! | `DATA_SERVICE_URL` | Data service base URL | `http://data-service:8000` |
//! | `ANALYTICS_SERVICE_URL` | Analytics service base URL | `http://analytics-service:9000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the auth service base URL.
pub const AUTH_SERVICE_URL_ENV: &str = "AUTH_SERVICE_URL";

/// Environment variable name for the data service base URL.
pub const DATA_SERVICE_URL_ENV: &str = "DATA_SERVICE_URL";

/// Environment variable name for the analytics service base URL.
pub const ANALYTICS_SERVICE_URL_ENV: &str = "ANALYTICS_SERVICE_URL";

/// Environment variable name for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default server bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved gateway configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Auth service base URL.
    pub auth_service_url: String,
    /// Data service base URL.
    pub data_service_url: String,
    /// Analytics service base URL.
    pub analytics_service_url: String,
}

impl Config {
    /// Read configuration from the environment, applying defaults.
    pub fn from_env() -> Self {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let auth_service_url = env::var(AUTH_SERVICE_URL_ENV)
            .unwrap_or_else(|_| "http://auth-service:8001".to_string());
        let data_service_url = env::var(DATA_SERVICE_URL_ENV)
            .unwrap_or_else(|_| "http://data-service:8000".to_string());
        let analytics_service_url = env::var(ANALYTICS_SERVICE_URL_ENV)
            .unwrap_or_else(|_| "http://analytics-service:9000".to_string());

        Self {
            host,
            port,
            auth_service_url,
            data_service_url,
            analytics_service_url,
        }
    }
}
