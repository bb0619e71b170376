//! Comment pruning.
//!
//! A [`FilterConfig`] turns into a [`FilterChain`] of [`CommentPredicate`]s.
//! Pruning is subtractive: an excluded comment takes its whole subtree with
//! it, and a kept comment has its replies filtered independently. Order is
//! never changed and the input forest is never touched; a new forest is
//! built instead.

mod predicate;

pub use predicate::{CommentPredicate, HideAuthor, HideDeleted, MinScore, AUTOMODERATOR};

use serde::{Deserialize, Serialize};

use crate::thread::{prune, walk, CommentNode};

/// Whether filters apply at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Apply the configured filters.
    #[default]
    #[serde(alias = "simplify-filtered")]
    #[value(alias = "simplify-filtered")]
    Simplify,
    /// Keep every comment; filters are inert.
    #[serde(alias = "extract-all")]
    #[value(alias = "extract-all")]
    All,
}

impl ExtractionMode {
    pub fn filters_active(self) -> bool {
        self == Self::Simplify
    }
}

/// Which predicates are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub hide_deleted: bool,
    pub hide_automoderator: bool,
    pub min_score: i64,
}

impl FilterConfig {
    /// A config that keeps every comment, whatever its score.
    pub fn disabled() -> Self {
        Self {
            hide_deleted: false,
            hide_automoderator: false,
            min_score: i64::MIN,
        }
    }

    /// Parse a free-form score threshold the way a text input is read:
    /// optional surrounding whitespace, optional sign, then the leading
    /// digits. Anything without leading digits is 0.
    pub fn parse_min_score(input: &str) -> i64 {
        let trimmed = input.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() {
            return 0;
        }
        let signed = if negative {
            format!("-{digits}")
        } else {
            digits.to_string()
        };
        signed.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX })
    }

    /// Build the predicate chain for this config.
    pub fn chain(&self) -> FilterChain {
        let mut chain = FilterChain::new();
        if self.hide_deleted {
            chain.push(HideDeleted);
        }
        if self.hide_automoderator {
            chain.push(HideAuthor::automoderator());
        }
        if self.min_score > i64::MIN {
            chain.push(MinScore(self.min_score));
        }
        chain
    }
}

/// Ordered set of predicates; a comment is dropped if any of them excludes it.
#[derive(Default)]
pub struct FilterChain {
    predicates: Vec<Box<dyn CommentPredicate>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: impl CommentPredicate + 'static) {
        self.predicates.push(Box::new(predicate));
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }

    pub fn excludes(&self, comment: &CommentNode) -> bool {
        self.predicates.iter().any(|p| p.excludes(comment))
    }

    /// Build a pruned copy of `forest`.
    pub fn apply(&self, forest: &[CommentNode]) -> Vec<CommentNode> {
        if self.is_empty() {
            return forest.to_vec();
        }

        prune(forest, |comment| !self.excludes(comment))
    }
}

/// Prune `forest` with `config`.
pub fn filter_comments(forest: &[CommentNode], config: &FilterConfig) -> Vec<CommentNode> {
    let chain = config.chain();
    let filtered = chain.apply(forest);

    tracing::debug!(
        predicates = ?chain.names(),
        before = walk(forest).count(),
        after = walk(&filtered).count(),
        "Filtered comments"
    );

    filtered
}

/// Prune `forest` only when `mode` has filters switched on; otherwise return
/// an unchanged copy.
pub fn filter_for_mode(
    forest: &[CommentNode],
    mode: ExtractionMode,
    config: &FilterConfig,
) -> Vec<CommentNode> {
    if mode.filters_active() {
        filter_comments(forest, config)
    } else {
        forest.to_vec()
    }
}
