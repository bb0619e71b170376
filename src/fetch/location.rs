//! Post page locations.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

fn post_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?s)(https?://(?:www\.)?reddit\.com)(/r/([^/]+)/comments/([^/]+).*)$")
            .expect("post url regex is valid")
    })
}

/// A validated Reddit post URL.
///
/// Only `http(s)://[www.]reddit.com/r/<subreddit>/comments/<id>...` is
/// accepted; anything else is rejected before a fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadUrl {
    url: String,
    origin_len: usize,
    subreddit: String,
    post_id: String,
}

impl ThreadUrl {
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidUrl {
            url: url.to_string(),
        };
        let caps = post_url_regex().captures(url).ok_or_else(invalid)?;
        let origin = caps.get(1).ok_or_else(invalid)?;
        Ok(Self {
            url: url.to_string(),
            origin_len: origin.end(),
            subreddit: caps[3].to_string(),
            post_id: caps[4].to_string(),
        })
    }

    pub fn is_valid(url: &str) -> bool {
        post_url_regex().is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Scheme and host, e.g. `https://www.reddit.com`.
    pub fn origin(&self) -> &str {
        &self.url[..self.origin_len]
    }

    /// Everything after the host.
    pub fn path(&self) -> &str {
        &self.url[self.origin_len..]
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Location of the JSON export: one trailing `/` dropped, `.json` appended.
    pub fn json_url(&self) -> String {
        self.json_url_at(self.origin())
    }

    /// Same as [`json_url`](Self::json_url) but served from another origin.
    pub fn json_url_at(&self, origin: &str) -> String {
        let path = self.path();
        let path = path.strip_suffix('/').unwrap_or(path);
        format!("{}{}.json", origin.trim_end_matches('/'), path)
    }
}

impl fmt::Display for ThreadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl std::str::FromStr for ThreadUrl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
