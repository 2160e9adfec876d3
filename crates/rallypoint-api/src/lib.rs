//! GraphQL API server for the Rallypoint records.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **GraphQL over HTTP** (`POST /graphql`) for the `users`, `events`,
//!   `locations`, and `participants` queries and their CRUD mutations
//! - **GraphQL over `WebSocket`** (`/ws`) for the `*Created`, `*Updated`,
//!   and `*Deleted` subscriptions
//! - **`GraphiQL`** (`GET /graphql`), a health check, and the schema SDL
//!
//! # Architecture
//!
//! Every resolver goes through the [`Service`](rallypoint_store::Service)
//! attached to the schema. Association fields (`User.events`,
//! `Event.user`, `Event.location`, `Event.participant`) are resolved
//! against the live store when a response is serialized. Subscriptions are
//! streams from the store's broadcast bus, so a client only receives
//! changes made after it subscribed.

pub mod handlers;
pub mod inputs;
pub mod objects;
pub mod router;
pub mod schema;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use schema::{AppSchema, build_schema};
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
