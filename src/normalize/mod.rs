//! Raw export to canonical [`Thread`] conversion.
//!
//! The export is a two-element array: a listing holding the post, and a
//! listing holding the top-level comments. Each comment may carry a nested
//! `replies` listing of its own. Only entries tagged as comments become
//! [`CommentNode`]s; "load more" placeholders and anything else are dropped.
//!
//! The walk uses an explicit stack of frames instead of recursion so that
//! reply chains of any depth normalize without growing the call stack.

mod raw;

pub use raw::{listing_children, RawKind, RawNode, COMMENT_KIND, CONTINUATION_KIND};

use serde_json::{json, Value};

use crate::error::StructuralError;
use crate::thread::{CommentNode, Post, Thread, DELETED};

/// Build a [`Thread`] from a parsed raw export.
///
/// Pure: the same input always yields the same thread or the same error.
pub fn normalize(export: &Value) -> Result<Thread, StructuralError> {
    let listings = export
        .as_array()
        .filter(|listings| listings.len() >= 2)
        .ok_or(StructuralError::NotAListingPair)?;

    let post = listing_children(&listings[0])
        .first()
        .map(RawNode::from_value)
        .filter(RawNode::has_payload)
        .map(|raw| post_from_raw(&raw))
        .ok_or(StructuralError::MissingPost)?;

    let comments = normalize_comments(listing_children(&listings[1]));

    tracing::debug!(
        top_level = comments.len(),
        "Normalized raw export into thread"
    );

    Ok(Thread::new(post, comments))
}

fn post_from_raw(raw: &RawNode<'_>) -> Post {
    Post {
        title: raw.text_or("title", ""),
        text: raw.text_or("selftext", ""),
        url: raw.text_or("url", ""),
        author: raw.text_or("author", DELETED),
        score: raw.integer("score"),
    }
}

fn comment_from_raw(raw: &RawNode<'_>) -> CommentNode {
    CommentNode::new(
        raw.text_or("author", DELETED),
        raw.integer("score"),
        raw.text_or("body", DELETED),
    )
}

/// One level of the walk: the comment being assembled (`None` for the root
/// forest), the entries still to visit, and the replies built so far.
struct Frame<'a> {
    node: Option<CommentNode>,
    pending: std::slice::Iter<'a, Value>,
    built: Vec<CommentNode>,
}

impl<'a> Frame<'a> {
    fn new(node: Option<CommentNode>, entries: &'a [Value]) -> Self {
        Self {
            node,
            pending: entries.iter(),
            built: Vec::new(),
        }
    }
}

/// Convert a listing's entries into a comment forest, preserving order.
pub fn normalize_comments(entries: &[Value]) -> Vec<CommentNode> {
    let mut stack = vec![Frame::new(None, entries)];

    while let Some(frame) = stack.last_mut() {
        match frame.pending.next() {
            Some(entry) => {
                let raw = RawNode::from_value(entry);
                if !raw.is_comment() {
                    continue;
                }
                let node = comment_from_raw(&raw);
                stack.push(Frame::new(Some(node), raw.replies()));
            }
            None => {
                let Some(done) = stack.pop() else { break };
                match (done.node, stack.last_mut()) {
                    (Some(mut node), Some(parent)) => {
                        node.replies = done.built;
                        parent.built.push(node);
                    }
                    // Root frame finished.
                    _ => return done.built,
                }
            }
        }
    }

    Vec::new()
}

/// Rebuild a raw export from a thread.
///
/// Produces the same listing shape Reddit serves, so that
/// `normalize(&denormalize(t))` reproduces `t` for threads whose fields are
/// non-empty.
pub fn denormalize(thread: &Thread) -> Value {
    let post = &thread.post;
    json!([
        listing(vec![json!({
            "kind": "t3",
            "data": {
                "title": post.title,
                "selftext": post.text,
                "url": post.url,
                "author": post.author,
                "score": post.score,
            }
        })]),
        listing(denormalize_comments(&thread.comments)),
    ])
}

fn listing(children: Vec<Value>) -> Value {
    json!({"kind": "Listing", "data": {"children": children}})
}

/// Listing entries for `forest`, built bottom-up from an explicit stack.
fn denormalize_comments(forest: &[CommentNode]) -> Vec<Value> {
    type Level<'a> = (
        Option<&'a CommentNode>,
        std::slice::Iter<'a, CommentNode>,
        Vec<Value>,
    );
    let mut stack: Vec<Level<'_>> = vec![(None, forest.iter(), Vec::new())];

    while let Some((_, pending, _)) = stack.last_mut() {
        match pending.next() {
            Some(child) => stack.push((Some(child), child.replies.iter(), Vec::new())),
            None => {
                let Some((source, _, built)) = stack.pop() else { break };
                match (source, stack.last_mut()) {
                    (Some(comment), Some((_, _, siblings))) => {
                        siblings.push(comment_entry(comment, built))
                    }
                    _ => return built,
                }
            }
        }
    }

    Vec::new()
}

fn comment_entry(comment: &CommentNode, replies: Vec<Value>) -> Value {
    let replies = if replies.is_empty() {
        Value::String(String::new())
    } else {
        listing(replies)
    };
    json!({
        "kind": COMMENT_KIND,
        "data": {
            "author": comment.author,
            "score": comment.score,
            "body": comment.body,
            "replies": replies,
        }
    })
}
