//! Server binary for the Rallypoint API.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `rallypoint-config.yaml` (or `RALLYPOINT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the store and notification bus
//! 4. Load seed data, if configured
//! 5. Serve HTTP and WebSocket traffic until `Ctrl-C`

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use rallypoint_api::{AppState, start_server};
use rallypoint_store::{EventBus, SeedData, Service, Store};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_FILE, LogFormat, LoggingConfig, RallypointConfig};
use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, seeding, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_path) = load_config()?;

    init_tracing(&config.logging);

    info!("rallypoint-server starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => warn!("Config file not found, using defaults"),
    }

    run(config).await?;
    Ok(())
}

async fn run(config: RallypointConfig) -> Result<(), AppError> {
    let store = Arc::new(Store::new());
    let bus = EventBus::new(config.bus.capacity);
    info!(capacity = config.bus.capacity, "Notification bus ready");

    if let Some(path) = &config.seed.file {
        info!(path = %path.display(), "Loading seed data");
        SeedData::from_file(path)?.apply(&store).await?;
    }

    let state = Arc::new(AppState::new(Service::new(store, bus)));
    start_server(&config.server_config(), state).await?;

    info!("rallypoint-server exited");
    Ok(())
}

/// Load configuration from `RALLYPOINT_CONFIG` or `rallypoint-config.yaml`.
///
/// A missing default file falls back to defaults; a missing file named by
/// `RALLYPOINT_CONFIG` is an error. Environment overrides apply either way.
fn load_config() -> Result<(RallypointConfig, Option<PathBuf>), AppError> {
    if let Ok(path) = std::env::var("RALLYPOINT_CONFIG") {
        let path = PathBuf::from(path);
        let config = RallypointConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if path.exists() {
        let config = RallypointConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = RallypointConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
