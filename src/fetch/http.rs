//! HTTP acquisition of the JSON export.

use std::time::Duration;

use async_trait::async_trait;

use super::{ExportSource, FetchOptions, ThreadUrl};
use crate::error::AcquisitionError;

/// Downloads `<post url>.json` with a hard deadline.
///
/// The deadline covers the whole exchange (connect, headers, body). When it
/// fires the in-flight request is dropped, so nothing from it lands after
/// the timeout has been reported.
pub struct HttpSource {
    client: reqwest::Client,
    url: ThreadUrl,
    origin: Option<String>,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: ThreadUrl, options: &FetchOptions) -> Result<Self, AcquisitionError> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| AcquisitionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url,
            origin: None,
            timeout: options.timeout,
        })
    }

    /// Serve the same path from a different origin (mirrors, tests).
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn endpoint(&self) -> String {
        match &self.origin {
            Some(origin) => self.url.json_url_at(origin),
            None => self.url.json_url(),
        }
    }

    async fn download(&self, endpoint: &str) -> Result<String, AcquisitionError> {
        let response = self
            .client
            .get(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim().is_empty() {
            return Err(AcquisitionError::EmptyPage);
        }
        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> AcquisitionError {
        if err.is_timeout() {
            AcquisitionError::Timeout(self.timeout)
        } else {
            AcquisitionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ExportSource for HttpSource {
    fn describe(&self) -> String {
        self.endpoint()
    }

    fn location(&self) -> Option<&ThreadUrl> {
        Some(&self.url)
    }

    async fn acquire(&self) -> Result<String, AcquisitionError> {
        let endpoint = self.endpoint();
        tracing::info!(url = %endpoint, timeout = ?self.timeout, "Fetching thread export");

        let body = tokio::time::timeout(self.timeout, self.download(&endpoint))
            .await
            .map_err(|_| AcquisitionError::Timeout(self.timeout))??;

        tracing::debug!(bytes = body.len(), "Fetched thread export");
        Ok(body)
    }
}
