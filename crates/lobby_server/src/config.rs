//! Server configuration loaded from TOML, the environment and CLI flags.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding the database location.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Lobby server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// SQLite database path (created if missing).
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Host the HTTP server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    port: u16,
}

#[instrument]
fn default_database_url() -> String {
    "lobby.db".to_string()
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl LobbyConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the effective configuration.
    ///
    /// Precedence, lowest first: built-in defaults, the TOML file (if
    /// given), `DATABASE_URL` from the environment.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_override(std::env::var(DATABASE_URL_VAR).ok()))
    }

    /// Replaces the database location when `database_url` is set.
    pub fn with_env_override(self, database_url: Option<String>) -> Self {
        match database_url {
            Some(url) if !url.trim().is_empty() => {
                debug!(database_url = %url, "Database location overridden");
                self.with_database_url(url)
            }
            _ => self,
        }
    }

    /// Sets the database location.
    pub fn with_database_url(mut self, database_url: String) -> Self {
        self.database_url = database_url;
        self
    }

    /// Sets the bind host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Sets the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
