//! Plain HTTP handlers that sit next to the GraphQL endpoints.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/graphql` | `GraphiQL` explorer |
//! | `GET` | `/health` | Liveness plus collection sizes |
//! | `GET` | `/schema.graphql` | Schema SDL |

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use rallypoint_store::StoreCounts;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving.
    pub status: &'static str,
    /// Current size of every collection.
    #[serde(flatten)]
    pub counts: StoreCounts,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with collection sizes and endpoint links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = state.service.store().counts().await;
    let StoreCounts {
        users,
        events,
        locations,
        participants,
    } = counts;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Rallypoint</title>
    <style>
        body {{ font-family: monospace; padding: 2rem; max-width: 720px; margin: 0 auto; }}
        li {{ padding: 0.2rem 0; }}
    </style>
</head>
<body>
    <h1>Rallypoint</h1>
    <p>Users: {users} &middot; Events: {events} &middot; Locations: {locations} &middot; Participants: {participants}</p>
    <ul>
        <li><a href="/graphql">/graphql</a> -- GraphiQL explorer (POST for queries and mutations)</li>
        <li><code>ws://host:port/ws</code> -- GraphQL subscriptions</li>
        <li><a href="/schema.graphql">/schema.graphql</a> -- Schema SDL</li>
        <li><a href="/health">/health</a> -- Health check</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /graphql -- GraphiQL
// ---------------------------------------------------------------------------

/// Serve the `GraphiQL` explorer wired to the HTTP and WebSocket endpoints.
pub async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/ws")
            .finish(),
    )
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report liveness and the size of every collection.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        counts: state.service.store().counts().await,
    })
}

// ---------------------------------------------------------------------------
// GET /schema.graphql
// ---------------------------------------------------------------------------

/// Return the schema in SDL form.
pub async fn sdl(State(state): State<Arc<AppState>>) -> String {
    state.schema.sdl()
}
