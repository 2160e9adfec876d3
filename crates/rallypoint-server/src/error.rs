//! Error types for the server binary.
//!
//! Wraps errors from the config loader, the seed loader, and the API
//! server into a single [`AppError`] for the startup sequence.

/// Errors that can occur while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Seed data could not be loaded.
    #[error("seed error: {source}")]
    Seed {
        /// The underlying seed error.
        #[from]
        source: rallypoint_store::SeedError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: rallypoint_api::ServerError,
    },
}
