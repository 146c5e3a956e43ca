// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use gateway::{
    api::router,
    config::{Config, LOG_FORMAT_ENV},
    routes::{Route, RouteTable},
    state::GatewayState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env();

    let table = RouteTable::new(vec![
        Route::replace("/auth", &config.auth_service_url, "/api")
            .expect("Invalid AUTH_SERVICE_URL"),
        Route::strip("/data", &config.data_service_url).expect("Invalid DATA_SERVICE_URL"),
        Route::strip("/analytics", &config.analytics_service_url)
            .expect("Invalid ANALYTICS_SERVICE_URL"),
    ]);

    let state = GatewayState::new(table);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "gateway listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json");
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
