//! Shared application state for the API server.
//!
//! [`AppState`] holds the [`Service`] (store plus notification bus) and
//! the GraphQL schema built around it. Both are cheap to clone and are
//! shared by every request and WebSocket connection.

use std::sync::Arc;

use rallypoint_store::{EventBus, Service, Store};

use crate::schema::{AppSchema, build_schema};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Query and mutation handlers.
    pub service: Service,
    /// The GraphQL schema, with `service` attached as context data.
    pub schema: AppSchema,
}

impl AppState {
    /// Create application state around an existing service.
    pub fn new(service: Service) -> Self {
        let schema = build_schema(service.clone());
        Self { service, schema }
    }

    /// Create application state with an empty store and a bus of the
    /// given capacity.
    pub fn with_capacity(bus_capacity: usize) -> Self {
        Self::new(Service::new(
            Arc::new(Store::new()),
            EventBus::new(bus_capacity),
        ))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Service::default())
    }
}
