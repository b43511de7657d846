//! Rendering of attribute values into HTML tables or pretty JSON.
//!
//! HTML output escapes every key and scalar through [`escape_html`], so
//! untrusted header or edge values can be embedded in a page. JSON output
//! is plain `serde_json` text and must only be served as `application/json`.

use std::borrow::Cow;

use serde::Serialize;

use crate::escape::{escape, escape_html};
use crate::value::AttributeValue;

/// Deepest container level that is rendered as a table.
pub const MAX_RENDER_DEPTH: usize = 64;

/// Markup emitted in place of a container nested beyond [`MAX_RENDER_DEPTH`].
pub const DEPTH_PLACEHOLDER: &str = r#"<span class="depth-limit">[nested too deep]</span>"#;

/// Output format of [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Nested `<table>` markup.
    Html,
    /// JSON with two-space indentation.
    Json,
}

/// Render a value in the requested format.
pub fn render(value: &AttributeValue, format: Format) -> String {
    match format {
        Format::Html => render_html(value),
        Format::Json => render_json(value),
    }
}

/// Render a value as nested HTML tables.
///
/// Mappings become one row per entry in insertion order, lists one row per
/// element keyed by its 0-based index, scalars their escaped text.
pub fn render_html(value: &AttributeValue) -> String {
    let mut out = String::new();
    write_html(&mut out, value, 0);
    out
}

/// Serialize any value as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Attribute trees always serialize: keys are strings and numbers finite.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn write_html(out: &mut String, value: &AttributeValue, depth: usize) {
    match value {
        AttributeValue::Map(bag) => write_table(
            out,
            bag.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)),
            depth,
        ),
        AttributeValue::List(items) => write_table(
            out,
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (Cow::Owned(i.to_string()), v)),
            depth,
        ),
        scalar => out.push_str(&escape(Some(scalar))),
    }
}

fn write_table<'a>(
    out: &mut String,
    rows: impl Iterator<Item = (Cow<'a, str>, &'a AttributeValue)>,
    depth: usize,
) {
    if depth >= MAX_RENDER_DEPTH {
        out.push_str(DEPTH_PLACEHOLDER);
        return;
    }

    out.push_str(r#"<table class="attributes"><tbody>"#);
    for (key, value) in rows {
        out.push_str("<tr><th>");
        out.push_str(&escape_html(&key));
        out.push_str("</th><td>");
        write_html(out, value, depth + 1);
        out.push_str("</td></tr>");
    }
    out.push_str("</tbody></table>");
}
