//! Request introspection core for request-inspector.
//!
//! This crate turns an inbound request into a [`RequestSnapshot`] and renders
//! attribute data safely:
//!
//! - [`value`]: the [`AttributeValue`] tree and ordered [`AttributeBag`]
//! - [`escape`]: HTML escaping of untrusted text
//! - [`render`]: nested HTML tables and pretty JSON
//! - [`snapshot`]: request normalization and single-field lookups
//! - [`edge`]: providers for the hosting edge's metadata bag
//!
//! # Example
//!
//! ```
//! use inspector_core::{Format, RequestSnapshot, render};
//!
//! let (parts, ()) = http::Request::builder()
//!     .header("X-Note", "<b>hi</b>")
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//! let snapshot = RequestSnapshot::from_parts(&parts, Default::default());
//!
//! let html = render(&snapshot.headers().clone().into(), Format::Html);
//! assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
//! ```

pub mod edge;
pub mod escape;
pub mod render;
pub mod snapshot;
pub mod value;

pub use edge::{EdgeMetadata, EdgeMetadataProvider, ExtensionProvider, StaticProvider};
pub use escape::{escape, escape_html};
pub use render::{DEPTH_PLACEHOLDER, Format, MAX_RENDER_DEPTH, render, render_html, render_json};
pub use snapshot::{RequestSnapshot, UNKNOWN};
pub use value::{AttributeBag, AttributeValue};
