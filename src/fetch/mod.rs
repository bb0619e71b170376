//! Acquiring the raw thread export.
//!
//! Everything here sits in front of the pure pipeline: validate the post
//! location, get the export text from somewhere ([`HttpSource`] or
//! [`FileSource`]), and parse it into an untyped JSON value. Shape checks
//! belong to the normalizer.

mod file;
mod http;
mod location;

pub use file::{FileSource, STDIN_PATH};
pub use http::HttpSource;
pub use location::ThreadUrl;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AcquisitionError, MalformedDataError};
use crate::thread::{STACK_RED_ZONE, STACK_SEGMENT};

/// Default deadline for a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where raw export text comes from.
#[async_trait]
pub trait ExportSource: Send + Sync {
    /// Human-readable origin for logs and messages.
    fn describe(&self) -> String;

    /// The post this export belongs to, if known.
    fn location(&self) -> Option<&ThreadUrl>;

    async fn acquire(&self) -> Result<String, AcquisitionError>;
}

/// Knobs for network acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("rtr/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse export text into an untyped value.
///
/// Nesting depth is not limited: the parser moves onto a new stack segment
/// whenever the current one runs low. Hand the result to [`release_export`]
/// once done with it.
pub fn parse_export(text: &str) -> Result<Value, MalformedDataError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let mut stacked = serde_stacker::Deserializer::new(&mut deserializer);
    stacked.red_zone = STACK_RED_ZONE;
    stacked.stack_size = STACK_SEGMENT;
    let value = Value::deserialize(stacked)?;
    deserializer.end()?;
    Ok(value)
}

/// Drop a parsed export without recursing into it.
///
/// `Value`'s own destructor descends one native frame per nesting level.
pub fn release_export(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(fields) => pending.extend(fields.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}
