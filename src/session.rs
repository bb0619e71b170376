//! Extraction session: the only stateful part of the pipeline.
//!
//! A [`Session`] owns the most recently extracted [`Thread`] together with the
//! current [`RenderConfig`] and [`FilterConfig`]. Fetching and normalizing
//! happen once per [`Session::extract`]; changing configuration afterwards
//! only re-runs filter and render over the cached thread.
//!
//! `extract` takes `&mut self` across its await point, so a second request
//! cannot start while one is outstanding.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ExtractError, RenderError, ValidationError};
use crate::fetch::{parse_export, release_export, ExportSource, ThreadUrl};
use crate::filter::{filter_for_mode, FilterConfig};
use crate::normalize::normalize;
use crate::render::{render, RenderConfig};
use crate::thread::Thread;

/// Filter then render a thread. Never modifies `thread`.
pub fn process(
    thread: &Thread,
    render_config: &RenderConfig,
    filters: &FilterConfig,
) -> Result<String, RenderError> {
    let view = apply_filters(thread, render_config, filters);
    render(&view, render_config.format)
}

/// Copy of `thread` with filters applied according to the extraction mode.
pub fn apply_filters(
    thread: &Thread,
    render_config: &RenderConfig,
    filters: &FilterConfig,
) -> Thread {
    thread.with_comments(filter_for_mode(&thread.comments, render_config.mode, filters))
}

#[derive(Debug, Default)]
pub struct Session {
    render: RenderConfig,
    filters: FilterConfig,
    location: Option<ThreadUrl>,
    thread: Option<Thread>,
}

impl Session {
    pub fn new(render: RenderConfig, filters: FilterConfig) -> Self {
        Self {
            render,
            filters,
            location: None,
            thread: None,
        }
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn filter_config(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn location(&self) -> Option<&ThreadUrl> {
        self.location.as_ref()
    }

    /// The cached, unfiltered thread.
    pub fn thread(&self) -> Option<&Thread> {
        self.thread.as_ref()
    }

    /// Point the session at a post. Switching to a different post drops the
    /// cached thread; re-selecting the same one keeps it.
    pub fn set_location(&mut self, url: &str) -> Result<&ThreadUrl, ValidationError> {
        let location = ThreadUrl::parse(url)?;
        self.switch_location(location);
        self.location.as_ref().ok_or_else(|| ValidationError::InvalidUrl {
            url: url.to_string(),
        })
    }

    fn switch_location(&mut self, location: ThreadUrl) {
        if self.location.as_ref() != Some(&location) {
            tracing::debug!(url = %location, "Switching session location");
            self.thread = None;
            self.location = Some(location);
        }
    }

    /// Acquire, normalize and cache a thread, then render it.
    ///
    /// Any cached thread is discarded first, so a failed extraction never
    /// leaves stale output behind.
    pub async fn extract(&mut self, source: &dyn ExportSource) -> Result<String, ExtractError> {
        if let Some(location) = source.location() {
            self.switch_location(location.clone());
        }
        self.thread = None;

        tracing::info!(source = %source.describe(), "Extracting thread");
        let text = source.acquire().await?;
        let raw = parse_export(&text)?;
        let output = self.load(&raw);
        release_export(raw);
        output
    }

    /// Normalize an already-parsed export, cache it and render it.
    pub fn load(&mut self, raw: &Value) -> Result<String, ExtractError> {
        let thread = normalize(raw)?;
        tracing::info!(
            title = %thread.post.title,
            comments = thread.comment_count(),
            depth = thread.max_depth(),
            "Normalized thread"
        );
        self.load_thread(thread)
    }

    /// Cache an existing canonical thread and render it.
    pub fn load_thread(&mut self, thread: Thread) -> Result<String, ExtractError> {
        self.thread = Some(thread);
        self.output()
    }

    /// Replace both configs. Returns the re-rendered output when a thread is
    /// cached; nothing is fetched or re-normalized.
    pub fn reconfigure(
        &mut self,
        render: RenderConfig,
        filters: FilterConfig,
    ) -> Result<Option<String>, RenderError> {
        self.render = render;
        self.filters = filters;
        self.thread
            .as_ref()
            .map(|thread| process(thread, &self.render, &self.filters))
            .transpose()
    }

    /// Render the cached thread with the current configuration.
    pub fn output(&self) -> Result<String, ExtractError> {
        let thread = self.thread.as_ref().ok_or(ExtractError::NothingExtracted)?;
        Ok(process(thread, &self.render, &self.filters)?)
    }

    /// Filtered copy of the cached thread.
    pub fn view(&self) -> Option<Thread> {
        self.thread
            .as_ref()
            .map(|thread| apply_filters(thread, &self.render, &self.filters))
    }
}

/// Result envelope handed to an embedding host: the output on success, a
/// short message otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, ExtractError>> for Response {
    fn from(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.user_message()),
            },
        }
    }
}
