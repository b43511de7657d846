//! Attribute values pulled from request headers and edge metadata.
//!
//! [`AttributeValue`] is a JSON-shaped tree. Mappings are [`AttributeBag`]s,
//! which keep insertion order so every output format lists keys the way the
//! source supplied them.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered, unique-keyed mapping of attribute names to values.
///
/// Inserting an existing key replaces its value in place (last write wins,
/// original position kept).
pub type AttributeBag = IndexMap<String, AttributeValue>;

/// A value observed on a request.
///
/// Values are owned trees, so they can never be cyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept in its canonical text form.
    Number(serde_json::Number),
    /// UTF-8 string.
    String(String),
    /// Ordered list.
    List(Vec<AttributeValue>),
    /// Ordered mapping.
    Map(AttributeBag),
}

impl AttributeValue {
    /// Text form of a scalar value.
    ///
    /// Returns `None` for `null`. Containers yield their compact JSON text.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::String(s) => Some(Cow::Borrowed(s)),
            Self::List(_) | Self::Map(_) => {
                Some(Cow::Owned(serde_json::to_string(self).unwrap_or_default()))
            }
        }
    }

    /// Borrow the inner string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for AttributeValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        Self::List(value)
    }
}

impl From<AttributeBag> for AttributeValue {
    fn from(value: AttributeBag) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
