// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{proxy, state::GatewayState};

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .fallback(forward)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Static landing response for the root path. The only unmatched path that
/// is not a client error.
async fn landing() -> &'static str {
    "API gateway is running"
}

/// Liveness probe. The gateway has no dependencies to check: backends are
/// probed per request, not ahead of time.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback handler: everything that is not the landing page or the health
/// probe is dispatched through the route table.
async fn forward(State(state): State<GatewayState>, request: Request) -> Response {
    match proxy::proxy_request(&state, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{Route, RouteTable};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_state() -> GatewayState {
        GatewayState::new(RouteTable::new(vec![
            Route::replace("/auth", "http://auth-service:8001", "/api").unwrap(),
            Route::strip("/data", "http://data-service:8000").unwrap(),
            Route::strip("/analytics", "http://analytics-service:9000").unwrap(),
        ]))
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(test_state());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn root_serves_the_landing_banner() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"API gateway is running");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unmatched_path_is_a_client_error() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nothing/here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "no route matched");
    }
}
