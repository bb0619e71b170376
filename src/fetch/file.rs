//! Reading a saved export from disk or stdin.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use super::{ExportSource, ThreadUrl};
use crate::error::AcquisitionError;

/// Path that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Export text stored in a file (or piped on stdin).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    location: Option<ThreadUrl>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            location: None,
        }
    }

    /// Record which post the file was saved from.
    pub fn for_location(mut self, location: ThreadUrl) -> Self {
        self.location = Some(location);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    async fn read(&self) -> std::io::Result<String> {
        if self.is_stdin() {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        } else {
            tokio::fs::read_to_string(&self.path).await
        }
    }
}

#[async_trait]
impl ExportSource for FileSource {
    fn describe(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    fn location(&self) -> Option<&ThreadUrl> {
        self.location.as_ref()
    }

    async fn acquire(&self) -> Result<String, AcquisitionError> {
        tracing::debug!(source = %self.describe(), "Reading thread export");
        let text = self.read().await.map_err(|source| AcquisitionError::Io {
            path: self.path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(AcquisitionError::EmptyPage);
        }
        Ok(text)
    }
}
