//! Shared application state.
//!
//! This module provides [`AppState`], which holds the read-only resources
//! shared by all HTTP request handlers.

use std::sync::Arc;

use tracing::info;

use inspector_common::{InspectorConfig, InspectorError};
use inspector_core::{EdgeMetadataProvider, ExtensionProvider, StaticProvider};

/// Shared state across all request handlers.
///
/// This struct is cloned for each request, so it uses `Arc` for shared data.
#[derive(Clone)]
pub struct AppState {
    /// Source of edge metadata for each request.
    edge: Arc<dyn EdgeMetadataProvider>,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Loads a [`StaticProvider`] when `edge.metadata_file` is set and
    /// falls back to the [`ExtensionProvider`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata file cannot be read or is not a
    /// JSON object.
    pub fn new(config: &InspectorConfig) -> Result<Self, InspectorError> {
        match &config.edge.metadata_file {
            Some(path) => {
                let provider = StaticProvider::from_file(path)?;
                info!(path = %path, "Serving static edge metadata");
                Ok(Self::with_provider(provider))
            }
            None => Ok(Self::default()),
        }
    }

    /// Create application state around a specific provider.
    pub fn with_provider(provider: impl EdgeMetadataProvider + 'static) -> Self {
        Self {
            edge: Arc::new(provider),
        }
    }

    /// Get the edge metadata provider.
    pub fn edge_provider(&self) -> &dyn EdgeMetadataProvider {
        self.edge.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_provider(ExtensionProvider)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("edge", &self.edge)
            .finish()
    }
}
