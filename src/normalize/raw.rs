//! Tagged view over untyped export entries.
//!
//! Reddit listings are arrays of `{"kind": "...", "data": {...}}` objects.
//! [`RawNode`] borrows one such entry and exposes its discriminator and
//! loosely-typed fields. It never escapes the normalizer.

use serde_json::{Map, Value};

/// Kind tag of a real comment.
pub const COMMENT_KIND: &str = "t1";

/// Kind tag of a "load more" placeholder.
pub const CONTINUATION_KIND: &str = "more";

/// Entry discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKind {
    Comment,
    Continuation,
    Other(String),
}

impl RawKind {
    fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(COMMENT_KIND) => Self::Comment,
            Some(CONTINUATION_KIND) => Self::Continuation,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }
}

/// One listing entry: kind plus its payload object, if it has one.
#[derive(Debug, Clone)]
pub struct RawNode<'a> {
    pub kind: RawKind,
    payload: Option<&'a Map<String, Value>>,
}

impl<'a> RawNode<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        let kind = RawKind::from_tag(value.get("kind").and_then(Value::as_str));
        let payload = value.get("data").and_then(Value::as_object);
        Self { kind, payload }
    }

    /// A comment entry that actually carries comment data.
    pub fn is_comment(&self) -> bool {
        self.kind == RawKind::Comment && self.payload.is_some()
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Non-empty string field. Empty strings count as missing.
    pub fn text(&self, field: &str) -> Option<&'a str> {
        self.payload?
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// String field with a fallback for missing or empty values.
    pub fn text_or(&self, field: &str, fallback: &str) -> String {
        self.text(field).unwrap_or(fallback).to_string()
    }

    /// Integer field; fractional numbers truncate, anything else is 0.
    pub fn integer(&self, field: &str) -> i64 {
        let Some(value) = self.payload.and_then(|p| p.get(field)) else {
            return 0;
        };
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .unwrap_or(0)
    }

    /// Children of the nested `replies` listing. Reddit sends `""` when a
    /// comment has none.
    pub fn replies(&self) -> &'a [Value] {
        self.payload
            .and_then(|p| p.get("replies"))
            .map(listing_children)
            .unwrap_or(&[])
    }
}

/// Entries of a `{"kind": "Listing", "data": {"children": [...]}}` value.
pub fn listing_children(listing: &Value) -> &[Value] {
    listing
        .get("data")
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
