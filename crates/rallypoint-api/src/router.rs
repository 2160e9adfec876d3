//! Axum router construction for the Rallypoint API.
//!
//! Assembles the GraphQL endpoints (HTTP + `WebSocket`) and the plain
//! handlers into a single [`Router`] with CORS and request tracing.

use std::sync::Arc;

use async_graphql_axum::{GraphQL, GraphQLSubscription};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /graphql` -- `GraphiQL` explorer
/// - `POST /graphql` -- queries and mutations
/// - `GET /ws` -- subscriptions over `graphql-transport-ws` / `graphql-ws`
/// - `GET /health` -- liveness and collection sizes
/// - `GET /schema.graphql` -- schema SDL
///
/// CORS allows any origin; there is no authentication to protect.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let schema = state.schema.clone();

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // GraphQL
        .route(
            "/graphql",
            get(handlers::graphiql).post_service(GraphQL::new(schema.clone())),
        )
        .route_service("/ws", GraphQLSubscription::new(schema))
        // Plain HTTP
        .route("/health", get(handlers::health))
        .route("/schema.graphql", get(handlers::sdl))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
