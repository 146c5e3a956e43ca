// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request forwarding.
//!
//! The gateway relays method, headers, query string, and body unchanged in
//! both directions, with two exceptions: hop-by-hop headers (meaningful
//! only per connection) are dropped, and the `Host` header is rewritten to
//! the target so backends see themselves as the origin.

use std::time::Duration;

use axum::{
    body::{to_bytes, Bytes},
    extract::Request,
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
};

use crate::{error::GatewayError, state::GatewayState};

/// Upstream response deadline.
const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Upstream connect deadline.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Headers that describe the client-gateway connection, not the request,
/// and must not be forwarded (RFC 9110 §7.6.1).
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Shared upstream HTTP client.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Send the rewritten request to the backend.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, GatewayError> {
        self.client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url, "upstream request failed");
                if e.is_timeout() {
                    GatewayError::UpstreamTimeout
                } else {
                    GatewayError::UpstreamUnreachable
                }
            })
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}

/// Route one inbound request: resolve, rewrite, forward, relay.
pub async fn proxy_request(
    state: &GatewayState,
    request: Request,
) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();

    let (route, rewritten) = state
        .table
        .resolve(parts.uri.path())
        .ok_or(GatewayError::NoRoute)?;
    let url = build_target_url(&route.target, &rewritten, parts.uri.query());

    tracing::debug!(method = %parts.method, path = %parts.uri.path(), to = %url, "proxying request");

    let body = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| GatewayError::Body)?;

    let mut headers = parts.headers;
    sanitize_request_headers(&mut headers);

    let upstream = state.forwarder.send(parts.method, &url, headers, body).await?;
    relay_response(upstream).await
}

/// Relay the backend's status, headers, and body verbatim.
///
/// The gateway never interprets or retries backend errors: a 500 from the
/// backend reaches the client as a 500.
async fn relay_response(upstream: reqwest::Response) -> Result<Response, GatewayError> {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    sanitize_response_headers(&mut headers);

    let body = upstream.bytes().await.map_err(|e| {
        tracing::warn!(error = %e, "failed to read upstream response body");
        GatewayError::UpstreamBody
    })?;

    Ok((status, headers, body).into_response())
}

/// Rewritten backend URL: base plus rewritten path plus the original query.
fn build_target_url(target: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{target}{path}?{query}"),
        None => format!("{target}{path}"),
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Prepare inbound headers for forwarding. `Host` and `Content-Length` are
/// derived from the outgoing request itself.
fn sanitize_request_headers(headers: &mut HeaderMap) {
    strip_hop_by_hop(headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
}

fn sanitize_response_headers(headers: &mut HeaderMap) {
    strip_hop_by_hop(headers);
    headers.remove(header::CONTENT_LENGTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn target_url_keeps_the_query_string() {
        assert_eq!(
            build_target_url("http://data-service:8000", "/foo/bar", Some("page=2&size=10")),
            "http://data-service:8000/foo/bar?page=2&size=10"
        );
        assert_eq!(
            build_target_url("http://data-service:8000", "/foo", None),
            "http://data-service:8000/foo"
        );
    }

    #[test]
    fn request_headers_drop_hop_by_hop_and_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("gateway:8080"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            header::TRANSFER_ENCODING,
            HeaderValue::from_static("chunked"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        sanitize_request_headers(&mut headers);

        assert!(headers.get(header::HOST).is_none());
        assert!(headers.get(header::CONNECTION).is_none());
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
        assert!(headers.get(header::CONTENT_LENGTH).is_none());
        // End-to-end headers pass through untouched.
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer t");
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn response_headers_keep_backend_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));

        sanitize_response_headers(&mut headers);

        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(headers.get("x-request-id").unwrap(), "abc-123");
        assert!(headers.get(header::CONNECTION).is_none());
    }
}
