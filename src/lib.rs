//! Reddit Thread Reducer.
//!
//! Turns a raw Reddit thread export (a post listing plus a recursive forest of
//! replies) into a typed [`Thread`], prunes it with [`FilterConfig`] rules and
//! renders it as canonical JSON or a Markdown outline.
//!
//! ```
//! use rtr::{normalize, FilterConfig, OutputFormat, RenderConfig};
//!
//! let raw = serde_json::json!([
//!     {"kind": "Listing", "data": {"children": [
//!         {"kind": "t3", "data": {"title": "Hello", "url": "https://example.com"}}
//!     ]}},
//!     {"kind": "Listing", "data": {"children": [
//!         {"kind": "t1", "data": {"author": "alice", "score": 3, "body": "hi", "replies": ""}}
//!     ]}}
//! ]);
//!
//! let thread = normalize(&raw).unwrap();
//! let config = RenderConfig { format: OutputFormat::Markdown, ..RenderConfig::default() };
//! let markdown = rtr::process(&thread, &config, &FilterConfig::default()).unwrap();
//! assert!(markdown.starts_with("# Hello"));
//! assert!(markdown.contains("**alice** (Score: 3)"));
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod render;
pub mod session;
pub mod thread;

pub use config::Config;
pub use error::{
    AcquisitionError, ExtractError, MalformedDataError, RenderError, StructuralError,
    ValidationError,
};
pub use fetch::{
    parse_export, release_export, ExportSource, FetchOptions, FileSource, HttpSource, ThreadUrl,
};
pub use filter::{filter_comments, filter_for_mode, ExtractionMode, FilterConfig};
pub use normalize::{denormalize, normalize};
pub use render::{render, OutlineRenderer, OutputFormat, RenderConfig, Renderer, StructuredRenderer};
pub use session::{process, Response, Session};
pub use thread::{CommentNode, Post, Thread};
