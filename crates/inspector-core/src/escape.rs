//! HTML escaping for untrusted request data.

use std::borrow::Cow;

use crate::value::AttributeValue;

const SPECIAL: [char; 5] = ['&', '<', '>', '"', '\''];

/// Escape a string for use in HTML text or a quoted attribute.
///
/// Single pass over the input, so `&` produced by a replacement is never
/// escaped again. Borrows the input when nothing needs replacing.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(SPECIAL) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape any attribute value. Absent and `null` values become `""`.
pub fn escape(value: Option<&AttributeValue>) -> String {
    match value.and_then(AttributeValue::as_text) {
        Some(text) => escape_html(&text).into_owned(),
        None => String::new(),
    }
}
