//! Canonical JSON rendering.

use super::Renderer;
use crate::error::RenderError;
use crate::thread::Thread;

/// Pretty-printed JSON of the thread, two-space indented, field order as
/// declared on the model types. [`Thread::from_structured`] reads it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredRenderer;

impl Renderer for StructuredRenderer {
    fn render(&self, thread: &Thread) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(thread)?)
    }
}
