//! Error taxonomy for the extraction pipeline.
//!
//! The pure stages (normalize, filter, render) only ever produce
//! [`StructuralError`] or [`RenderError`]. Validation happens before any fetch,
//! and acquisition/malformed-data errors come from the fetch layer and are
//! passed through unchanged.

use std::path::PathBuf;
use std::time::Duration;

/// Hint appended to acquisition failures shown to users.
pub const CONNECTIVITY_HINT: &str = "Please check your network connection or try again.";

/// The requested location is not a post page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Reddit post URL: {url}")]
    InvalidUrl { url: String },
}

/// Transport-level failures while acquiring the raw export.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("Timeout loading Reddit data (gave up after {}s)", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Failed to fetch data from Reddit: {0}")]
    Transport(String),

    #[error("Reddit responded with HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to read page content")]
    EmptyPage,

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The fetched payload is not JSON at all.
#[derive(Debug, thiserror::Error)]
#[error("Received malformed data from Reddit: {0}")]
pub struct MalformedDataError(#[from] pub serde_json::Error);

/// The payload parsed but does not have the listing-pair shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("Could not parse Reddit data structure: expected a [post, comments] listing pair")]
    NotAListingPair,

    #[error("Could not parse Reddit data structure: post listing has no entry")]
    MissingPost,
}

/// Failure serializing a thread. Not expected for well-formed threads.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize thread: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Any failure of a full extraction request.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    MalformedData(#[from] MalformedDataError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("No thread has been extracted yet")]
    NothingExtracted,
}

impl ExtractError {
    /// Short message for display, with a connectivity hint for acquisition failures.
    pub fn user_message(&self) -> String {
        match self {
            Self::Acquisition(err) => format!("{err}. {CONNECTIVITY_HINT}"),
            other => other.to_string(),
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Acquisition(_))
    }
}
