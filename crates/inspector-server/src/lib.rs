//! HTTP server for request-inspector.
//!
//! This crate provides the HTTP interface of the inspector. It handles:
//!
//! - HTTP request routing
//! - Request normalization into snapshots
//! - The HTML dashboard and JSON / plain-text endpoints
//! - Status echo and delayed responses
//!
//! # Quick Start
//!
//! ```ignore
//! use inspector_common::InspectorConfig;
//! use inspector_server::InspectorServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = InspectorServer::new(&InspectorConfig::default())?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod handler;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

pub use server::{InspectorServer, ServerConfig, TestHandle};
pub use state::AppState;
