//! Configuration structures for request-inspector.
//!
//! This module defines configuration options and the TOML file format:
//! - [`InspectorConfig`]: Top-level configuration containing all settings
//! - [`ServerSettings`]: HTTP server settings (bind address, timeouts)
//! - [`EdgeSettings`]: Where edge metadata comes from
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0:8080"
//! request_timeout_secs = 30
//! graceful_shutdown = true
//!
//! [edge]
//! metadata_file = "./edge.json"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::InspectorError;

/// Top-level inspector configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InspectorConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerSettings,

    /// Edge metadata configuration.
    #[serde(default)]
    pub edge: EdgeSettings,
}

impl InspectorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigFileError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Load the startup configuration.
    ///
    /// Reads `path` when given, otherwise starts from defaults, then applies
    /// the `bind_addr` override.
    pub fn load(path: Option<&str>, bind_addr: Option<String>) -> Result<Self, InspectorError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(bind_addr) = bind_addr {
            config.server.bind_addr = bind_addr;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            message: e.to_string(),
        })
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "defaults::bind_addr")]
    pub bind_addr: String,

    /// Request timeout in seconds.
    ///
    /// This also bounds how long `/delay/:ms` may wait.
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Enable graceful shutdown on SIGTERM/SIGINT.
    #[serde(default = "defaults::graceful_shutdown")]
    pub graceful_shutdown: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: defaults::bind_addr(),
            request_timeout_secs: defaults::request_timeout_secs(),
            graceful_shutdown: defaults::graceful_shutdown(),
        }
    }
}

impl ServerSettings {
    /// Parse the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, InspectorError> {
        self.bind_addr.parse().map_err(|_| {
            InspectorError::invalid_config(format!(
                "bind_addr '{}' is not in 'host:port' form",
                self.bind_addr
            ))
        })
    }
}

/// Edge metadata settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EdgeSettings {
    /// JSON file holding a fixed edge metadata object.
    ///
    /// When unset, edge metadata is read from request extensions
    /// inserted by the hosting layer.
    #[serde(default)]
    pub metadata_file: Option<String>,
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}

/// Default value functions for serde.
mod defaults {
    pub fn bind_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    pub const fn request_timeout_secs() -> u64 {
        30
    }

    pub const fn graceful_shutdown() -> bool {
        true
    }
}
