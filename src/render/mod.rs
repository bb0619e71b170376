//! Output rendering.
//!
//! - [`structured`] - canonical JSON, lossless
//! - [`outline`] - indented Markdown outline with quoted bodies

mod outline;
mod structured;

pub use outline::OutlineRenderer;
pub use structured::StructuredRenderer;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::filter::ExtractionMode;
use crate::thread::Thread;

/// Serializes a thread into an output document.
pub trait Renderer {
    fn render(&self, thread: &Thread) -> Result<String, RenderError>;
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Canonical JSON
    #[default]
    #[serde(alias = "structured")]
    #[value(alias = "structured")]
    Json,
    /// Markdown outline
    #[serde(alias = "outline")]
    #[value(alias = "outline")]
    Markdown,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Self::Json => Box::new(StructuredRenderer),
            Self::Markdown => Box::new(OutlineRenderer),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }
}

/// Extraction mode plus output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: ExtractionMode,
    pub format: OutputFormat,
}

/// Render `thread` in `format`.
pub fn render(thread: &Thread, format: OutputFormat) -> Result<String, RenderError> {
    let output = format.renderer().render(thread)?;
    tracing::debug!(format = format.name(), bytes = output.len(), "Rendered thread");
    Ok(output)
}
