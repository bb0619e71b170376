//! Markdown outline rendering.
//!
//! Layout, byte for byte:
//!
//! ```text
//! # {title}
//!
//! **URL:** [{url}]({url})
//! **Author:** {author} | **Score:** {score}
//!
//! > {each line of the self text, if any}
//!
//! ---
//!
//! ### Comments
//!
//! *   **{author}** (Score: {score})
//!     > {each line of the body}
//!
//!     *   **{reply author}** (Score: {score})
//!         > {each line of the reply body}
//!
//! ```

use super::Renderer;
use crate::error::RenderError;
use crate::thread::{walk, CommentNode, Post, Thread};

/// One level of nesting.
const INDENT: &str = "    ";
const BULLET: &str = "*   ";
const QUOTE: &str = "> ";

#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineRenderer;

impl OutlineRenderer {
    /// Render without going through the [`Renderer`] result type.
    pub fn to_markdown(&self, thread: &Thread) -> String {
        let mut out = String::new();
        push_post(&mut out, &thread.post);
        out.push_str("---\n\n### Comments\n\n");
        for (comment, depth) in walk(&thread.comments) {
            push_comment(&mut out, comment, depth);
        }
        out
    }
}

impl Renderer for OutlineRenderer {
    fn render(&self, thread: &Thread) -> Result<String, RenderError> {
        Ok(self.to_markdown(thread))
    }
}

fn push_post(out: &mut String, post: &Post) {
    out.push_str(&format!("# {}\n\n", post.title));
    out.push_str(&format!("**URL:** [{url}]({url})\n", url = post.url));
    out.push_str(&format!(
        "**Author:** {} | **Score:** {}\n\n",
        post.author, post.score
    ));
    if !post.text.is_empty() {
        push_quote(out, &post.text, "");
        out.push_str("\n\n");
    }
}

fn push_comment(out: &mut String, comment: &CommentNode, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&format!(
        "{indent}{BULLET}**{}** (Score: {})\n",
        comment.author, comment.score
    ));
    if !comment.body.is_empty() {
        push_quote(out, &comment.body, &format!("{indent}{INDENT}"));
        out.push_str("\n\n");
    }
}

/// Quote every line of `text`, blank ones included, joined by newlines.
fn push_quote(out: &mut String, text: &str, prefix: &str) {
    let quoted: Vec<String> = text
        .split('\n')
        .map(|line| format!("{prefix}{QUOTE}{line}"))
        .collect();
    out.push_str(&quoted.join("\n"));
}
