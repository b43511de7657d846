//! Common types, errors, and configuration for request-inspector.
//!
//! This crate provides shared functionality used across the workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures loaded from defaults or a TOML file

pub mod config;
pub mod error;

pub use config::{ConfigFileError, EdgeSettings, InspectorConfig, ServerSettings};
pub use error::InspectorError;
