//! Canonical comment tree.
//!
//! A [`Thread`] is the typed form of a discussion export: one [`Post`] and an
//! ordered forest of [`CommentNode`]s. It is built once per fetch by the
//! normalizer and never mutated afterwards; filters and renderers take it by
//! reference and produce new values.
//!
//! The serde representation of these types is the structured (canonical)
//! output format, so field names and order here are part of the output.
//!
//! Reply chains can be arbitrarily deep. Cloning, comparing and dropping a
//! [`CommentNode`] all work from an explicit stack, and (de)serialization
//! grows the native stack on demand instead of overflowing it.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Placeholder for an author or body that is missing from the export.
pub const DELETED: &str = "[deleted]";

/// Placeholder Reddit uses for a body removed by moderators.
pub const REMOVED: &str = "[removed]";

/// The submission a thread hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Self text. Empty for link posts.
    pub text: String,
    pub url: String,
    pub author: String,
    pub score: i64,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            url: String::new(),
            author: DELETED.to_string(),
            score: 0,
        }
    }
}

/// Headroom left on the native stack before a nested (de)serialize call
/// moves to a freshly allocated segment.
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each extra stack segment.
pub(crate) const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// A single comment and its replies, in export order.
#[derive(Debug, Deserialize)]
pub struct CommentNode {
    pub author: String,
    pub score: i64,
    pub body: String,
    #[serde(default)]
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(author: impl Into<String>, score: i64, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            score,
            body: body.into(),
            replies: Vec::new(),
        }
    }

    /// Builder-style helper for attaching replies.
    pub fn with_replies(mut self, replies: Vec<CommentNode>) -> Self {
        self.replies = replies;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Default for CommentNode {
    fn default() -> Self {
        Self::new(DELETED, 0, DELETED)
    }
}

impl Clone for CommentNode {
    fn clone(&self) -> Self {
        prune(std::slice::from_ref(self), |_| true)
            .pop()
            .unwrap_or_default()
    }
}

impl PartialEq for CommentNode {
    /// Two trees are equal when their pre-order walks match node for node,
    /// reply counts included.
    fn eq(&self, other: &Self) -> bool {
        fn key(node: &CommentNode) -> (&str, i64, &str, usize) {
            (node.author.as_str(), node.score, node.body.as_str(), node.replies.len())
        }
        walk(std::slice::from_ref(self))
            .map(|(node, _)| key(node))
            .eq(walk(std::slice::from_ref(other)).map(|(node, _)| key(node)))
    }
}

impl Eq for CommentNode {}

impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

impl Serialize for CommentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            let mut state = serializer.serialize_struct("CommentNode", 4)?;
            state.serialize_field("author", &self.author)?;
            state.serialize_field("score", &self.score)?;
            state.serialize_field("body", &self.body)?;
            state.serialize_field("replies", &self.replies)?;
            state.end()
        })
    }
}

/// Post plus comment forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub post: Post,
    #[serde(default)]
    pub comments: Vec<CommentNode>,
}

impl Thread {
    pub fn new(post: Post, comments: Vec<CommentNode>) -> Self {
        Self { post, comments }
    }

    /// Parse a previously rendered structured document back into a thread.
    pub fn from_structured(json: &str) -> serde_json::Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let mut stacked = serde_stacker::Deserializer::new(&mut deserializer);
        stacked.red_zone = STACK_RED_ZONE;
        stacked.stack_size = STACK_SEGMENT;
        let thread = Self::deserialize(stacked)?;
        deserializer.end()?;
        Ok(thread)
    }

    /// Same thread with `comments` swapped out.
    pub fn with_comments(&self, comments: Vec<CommentNode>) -> Self {
        Self {
            post: self.post.clone(),
            comments,
        }
    }

    /// Total number of comments at every depth.
    pub fn comment_count(&self) -> usize {
        walk(&self.comments).count()
    }

    /// Depth of the deepest comment, counting top-level comments as depth 1.
    /// Zero when there are no comments.
    pub fn max_depth(&self) -> usize {
        walk(&self.comments)
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Pre-order walk over a forest yielding each node with its depth.
///
/// Uses an explicit stack, so arbitrarily deep reply chains are fine.
pub fn walk(forest: &[CommentNode]) -> impl Iterator<Item = (&CommentNode, usize)> {
    let mut stack: Vec<(&CommentNode, usize)> = forest.iter().rev().map(|c| (c, 0)).collect();
    std::iter::from_fn(move || {
        let (node, depth) = stack.pop()?;
        stack.extend(node.replies.iter().rev().map(|r| (r, depth + 1)));
        Some((node, depth))
    })
}

/// Copy `forest`, leaving out every comment `keep` rejects together with
/// all of its replies. Order is preserved.
pub fn prune(
    forest: &[CommentNode],
    mut keep: impl FnMut(&CommentNode) -> bool,
) -> Vec<CommentNode> {
    let mut stack = vec![Frame::new(None, forest)];

    while let Some(frame) = stack.last_mut() {
        match frame.pending.next() {
            Some(child) => {
                if keep(child) {
                    stack.push(Frame::new(Some(child), &child.replies));
                }
            }
            None => {
                let Some(done) = stack.pop() else { break };
                match (done.source, stack.last_mut()) {
                    (Some(source), Some(parent)) => parent.built.push(CommentNode {
                        author: source.author.clone(),
                        score: source.score,
                        body: source.body.clone(),
                        replies: done.built,
                    }),
                    _ => return done.built,
                }
            }
        }
    }

    Vec::new()
}

struct Frame<'a> {
    source: Option<&'a CommentNode>,
    pending: std::slice::Iter<'a, CommentNode>,
    built: Vec<CommentNode>,
}

impl<'a> Frame<'a> {
    fn new(source: Option<&'a CommentNode>, children: &'a [CommentNode]) -> Self {
        Self {
            source,
            pending: children.iter(),
            built: Vec::new(),
        }
    }
}
