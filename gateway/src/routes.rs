// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Route Table
//!
//! The route table is data, not code: an ordered collection of
//! (prefix, target, rewrite) records built once at startup and looked up
//! by longest-prefix match on every request. It is immutable for the
//! process lifetime and shared read-only across all requests.

use url::Url;

/// How the matched prefix is rewritten before forwarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Drop the matched prefix entirely.
    Strip,
    /// Replace the matched prefix with another path segment.
    Replace(String),
}

/// One prefix-to-backend mapping.
#[derive(Debug, Clone)]
pub struct Route {
    /// Inbound path prefix, e.g. `/data`.
    pub prefix: String,
    /// Backend base URL, no trailing slash.
    pub target: String,
    /// Prefix rewrite rule.
    pub rewrite: Rewrite,
}

impl Route {
    /// A route that strips its prefix, e.g. `/data/foo` -> `/foo`.
    pub fn strip(prefix: &str, target: &str) -> Result<Self, url::ParseError> {
        Self::new(prefix, target, Rewrite::Strip)
    }

    /// A route that replaces its prefix, e.g. `/auth/login` -> `/api/login`.
    pub fn replace(prefix: &str, target: &str, replacement: &str) -> Result<Self, url::ParseError> {
        Self::new(prefix, target, Rewrite::Replace(replacement.to_string()))
    }

    fn new(prefix: &str, target: &str, rewrite: Rewrite) -> Result<Self, url::ParseError> {
        // Reject unparseable backend URLs at startup rather than per request.
        Url::parse(target)?;
        Ok(Self {
            prefix: prefix.to_string(),
            target: target.trim_end_matches('/').to_string(),
            rewrite,
        })
    }

    /// Match at a path-segment boundary: `/data` matches `/data` and
    /// `/data/foo`, never `/database`. Returns the remainder after the
    /// prefix.
    fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Apply the rewrite rule to the remainder of a matched path.
    fn rewrite_path(&self, rest: &str) -> String {
        match &self.rewrite {
            Rewrite::Strip => {
                if rest.is_empty() {
                    "/".to_string()
                } else {
                    rest.to_string()
                }
            }
            Rewrite::Replace(replacement) => format!("{replacement}{rest}"),
        }
    }
}

/// Static prefix-to-backend mapping, longest prefix first.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build the table. Longest prefix wins regardless of configuration
    /// order.
    pub fn new(mut routes: Vec<Route>) -> Self {
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    /// Find the route for an inbound path and compute the rewritten path.
    ///
    /// Each lookup is independent and order-independent; the table holds
    /// no per-request state.
    pub fn resolve(&self, path: &str) -> Option<(&Route, String)> {
        for route in &self.routes {
            if let Some(rest) = route.matches(path) {
                return Some((route, route.rewrite_path(rest)));
            }
        }
        None
    }
}
