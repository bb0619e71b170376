//! Exclusion predicates over single comments.

use crate::thread::{CommentNode, DELETED, REMOVED};

/// Account name of Reddit's moderation bot.
pub const AUTOMODERATOR: &str = "AutoModerator";

/// Decides whether a comment (and with it its whole subtree) is dropped.
///
/// Predicates look at the node only, never at its replies.
pub trait CommentPredicate: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    fn excludes(&self, comment: &CommentNode) -> bool;
}

/// Drops comments whose author *and* body are both gone.
///
/// A deleted author with a surviving body, or a real author whose body was
/// removed, is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct HideDeleted;

impl CommentPredicate for HideDeleted {
    fn name(&self) -> &'static str {
        "hide-deleted"
    }

    fn excludes(&self, comment: &CommentNode) -> bool {
        comment.author == DELETED && (comment.body == DELETED || comment.body == REMOVED)
    }
}

/// Drops comments written by one exact account name.
#[derive(Debug, Clone)]
pub struct HideAuthor {
    author: String,
}

impl HideAuthor {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }

    pub fn automoderator() -> Self {
        Self::new(AUTOMODERATOR)
    }
}

impl CommentPredicate for HideAuthor {
    fn name(&self) -> &'static str {
        "hide-author"
    }

    fn excludes(&self, comment: &CommentNode) -> bool {
        comment.author == self.author
    }
}

/// Drops comments scored strictly below a threshold.
#[derive(Debug, Clone, Copy)]
pub struct MinScore(pub i64);

impl CommentPredicate for MinScore {
    fn name(&self) -> &'static str {
        "min-score"
    }

    fn excludes(&self, comment: &CommentNode) -> bool {
        comment.score < self.0
    }
}
