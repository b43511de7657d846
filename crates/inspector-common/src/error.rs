//! Error types for request-inspector.
//!
//! [`InspectorError`] is the single error type shared by the workspace.
//! Only [`InspectorError::InvalidParameter`] can occur while serving a
//! request; the remaining variants are startup failures.

use std::io;

use thiserror::Error;

use crate::config::ConfigFileError;

/// Top-level inspector errors.
#[derive(Error, Debug)]
pub enum InspectorError {
    /// A path parameter failed to parse or fell outside its valid range.
    #[error("Invalid {parameter}: {value:?}")]
    InvalidParameter {
        /// Human-readable name of the parameter (e.g. "status code").
        parameter: &'static str,
        /// The raw value received on the path.
        value: String,
    },

    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Configuration file could not be loaded.
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl InspectorError {
    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter(parameter: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.into(),
        }
    }

    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was caused by the client's request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Short message safe to send back to the client.
    ///
    /// The raw parameter value is left out so untrusted input is never
    /// echoed in error bodies.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidParameter { parameter, .. } => format!("Invalid {parameter}"),
            _ => "Internal server error".to_string(),
        }
    }
}
