//! Configuration loading and typed config structures for the server.
//!
//! The configuration lives in `rallypoint-config.yaml` in the working
//! directory (or wherever `RALLYPOINT_CONFIG` points). Every section is
//! optional; a missing file means all defaults. A relative `seed.file`
//! is resolved against the directory holding the config file.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 4000
//! bus:
//!   capacity: 256
//! logging:
//!   level: info
//!   format: pretty   # or json
//! seed:
//!   file: seed.yaml
//! ```

use std::path::{Path, PathBuf};

use rallypoint_api::ServerConfig;
use serde::Deserialize;

/// Default config file name, looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rallypoint-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {var}")]
    Env {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RallypointConfig {
    /// Bind address.
    #[serde(default)]
    pub server: ServerSection,

    /// Notification bus settings.
    #[serde(default)]
    pub bus: BusConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Startup seed data.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl RallypointConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the bind address:
    /// - `RALLYPOINT_HOST` overrides `server.host`
    /// - `RALLYPOINT_PORT` (or `PORT`) overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        if let Some(dir) = path.parent() {
            config.resolve_relative_to(dir);
        }
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Anchor relative file paths at `dir`.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        if let Some(file) = self.seed.file.take() {
            self.seed.file = Some(if file.is_relative() {
                dir.join(file)
            } else {
                file
            });
        }
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a port override is not a `u16`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a port override is not a `u16`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RALLYPOINT_HOST") {
            self.server.host = host;
        }
        for var in ["RALLYPOINT_PORT", "PORT"] {
            if let Some(value) = lookup(var) {
                self.server.port = value
                    .trim()
                    .parse()
                    .map_err(|_invalid| ConfigError::Env { var, value })?;
                break;
            }
        }
        Ok(())
    }

    /// The bind address in the form the API server takes.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

/// Bind address section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Notification bus section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusConfig {
    /// How many notifications a subscriber may fall behind before it
    /// starts skipping.
    #[serde(default = "default_bus_capacity")]
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: default_bus_capacity(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines with targets.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Seed data section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// YAML file of records to load at startup.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    4000
}

const fn default_bus_capacity() -> usize {
    rallypoint_store::bus::DEFAULT_CAPACITY
}

fn default_log_level() -> String {
    String::from("info")
}
