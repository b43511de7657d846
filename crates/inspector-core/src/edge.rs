//! Edge metadata providers.
//!
//! The hosting edge network (geolocation, ASN, bot score, ...) is an
//! external collaborator. Its data reaches the normalizer through an
//! [`EdgeMetadataProvider`], which the server holds in its shared state.

use std::path::Path;

use http::request::Parts;
use tracing::debug;

use inspector_common::InspectorError;

use crate::value::AttributeBag;

/// Request extension carrying edge metadata.
///
/// An upstream layer inserts this into the request; [`ExtensionProvider`]
/// reads it back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMetadata(pub AttributeBag);

/// Source of the opaque edge metadata bag for a request.
pub trait EdgeMetadataProvider: Send + Sync + std::fmt::Debug {
    /// Return the edge metadata for this request, or an empty bag.
    fn metadata(&self, parts: &Parts) -> AttributeBag;
}

/// Reads the [`EdgeMetadata`] request extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionProvider;

impl EdgeMetadataProvider for ExtensionProvider {
    fn metadata(&self, parts: &Parts) -> AttributeBag {
        parts
            .extensions
            .get::<EdgeMetadata>()
            .map(|m| m.0.clone())
            .unwrap_or_default()
    }
}

/// Serves the same bag for every request.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    metadata: AttributeBag,
}

impl StaticProvider {
    /// Create a provider from an existing bag.
    pub fn new(metadata: AttributeBag) -> Self {
        Self { metadata }
    }

    /// Parse a provider from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, InspectorError> {
        let metadata: AttributeBag = serde_json::from_str(json).map_err(|e| {
            InspectorError::invalid_config(format!("edge metadata must be a JSON object: {e}"))
        })?;
        Ok(Self::new(metadata))
    }

    /// Load a provider from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InspectorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let provider = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            keys = provider.metadata.len(),
            "Loaded static edge metadata"
        );
        Ok(provider)
    }
}

impl EdgeMetadataProvider for StaticProvider {
    fn metadata(&self, _parts: &Parts) -> AttributeBag {
        self.metadata.clone()
    }
}
