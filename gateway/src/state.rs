// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{proxy::Forwarder, routes::RouteTable};

/// Shared gateway state.
///
/// The route table is immutable after startup and the forwarder's client
/// is internally pooled; both are read-only per request, so no locking is
/// needed.
#[derive(Clone)]
pub struct GatewayState {
    /// Static prefix-to-backend mapping.
    pub table: Arc<RouteTable>,
    /// Shared upstream HTTP client.
    pub forwarder: Forwarder,
}

impl GatewayState {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
            forwarder: Forwarder::new(),
        }
    }
}
