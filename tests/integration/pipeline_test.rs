//! End-to-end pipeline over a saved export

use rtr::thread::walk;
use rtr::{
    normalize, parse_export, process, ExtractionMode, FileSource, FilterConfig, OutputFormat,
    RenderConfig, Session, ThreadUrl,
};

use crate::helpers::{deep_export, load_fixture, temp_fixture};

fn fixture_thread() -> rtr::Thread {
    let raw = parse_export(&load_fixture("thread_export.json")).unwrap();
    normalize(&raw).unwrap()
}

#[test]
fn normalize_drops_continuations_and_keeps_order() {
    let thread = fixture_thread();

    assert_eq!(thread.post.title, "What crate do you reach for first?");
    assert_eq!(thread.post.score, 42);
    let outline: Vec<_> = walk(&thread.comments)
        .map(|(c, depth)| (c.author.as_str(), depth))
        .collect();
    assert_eq!(
        outline,
        vec![
            ("AutoModerator", 0),
            ("alice", 0),
            ("[deleted]", 1),
            ("carol", 2),
            ("bob", 1),
            ("dave", 0),
        ]
    );
    assert_eq!(thread.max_depth(), 3);
}

#[test]
fn empty_body_becomes_deleted_marker() {
    let thread = fixture_thread();
    assert_eq!(thread.comments[2].author, "dave");
    assert_eq!(thread.comments[2].body, "[deleted]");
}

#[test]
fn hide_deleted_takes_the_subtree() {
    let thread = fixture_thread();
    let config = FilterConfig {
        hide_deleted: true,
        ..FilterConfig::disabled()
    };
    let render = RenderConfig {
        mode: ExtractionMode::Simplify,
        format: OutputFormat::Markdown,
    };

    let output = process(&thread, &render, &config).unwrap();
    assert!(!output.contains("carol"));
    assert!(output.contains("**bob** (Score: -2)"));
    // The cached thread is untouched.
    assert_eq!(thread.comment_count(), 6);
}

#[test]
fn nested_replies_are_indented() {
    let thread = fixture_thread();
    let render = RenderConfig {
        mode: ExtractionMode::All,
        format: OutputFormat::Markdown,
    };

    let output = process(&thread, &render, &FilterConfig::default()).unwrap();
    assert!(output.contains("\n    *   **[deleted]** (Score: 3)\n        > [removed]\n\n"));
    assert!(output.contains("\n        *   **carol** (Score: 8)\n            > Agreed with the above.\n\n"));
}

#[tokio::test]
async fn session_switches_between_views_without_reloading() {
    let (_dir, path) = temp_fixture("thread_export.json");
    let location =
        ThreadUrl::parse("https://www.reddit.com/r/rust/comments/abc123/what_crate/").unwrap();
    let source = FileSource::new(&path).for_location(location);

    let mut session = Session::default();
    let json = session.extract(&source).await.unwrap();
    assert!(json.contains("\"title\": \"What crate do you reach for first?\""));

    // The file is gone; only the cache can serve the next render.
    std::fs::remove_file(&path).unwrap();

    let markdown = session
        .reconfigure(
            RenderConfig {
                mode: ExtractionMode::Simplify,
                format: OutputFormat::Markdown,
            },
            FilterConfig {
                hide_automoderator: true,
                ..FilterConfig::default()
            },
        )
        .unwrap()
        .unwrap();

    assert!(markdown.starts_with("# What crate do you reach for first?\n\n"));
    assert!(!markdown.contains("AutoModerator"));
    assert!(!markdown.contains("**bob**"));
    assert_eq!(session.location().unwrap().subreddit(), "rust");
}

#[tokio::test]
async fn deep_reply_chain_survives_the_whole_pipeline() {
    let depth = 5_000;
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deep.json");
    std::fs::write(&path, deep_export(depth)).unwrap();

    let mut session = Session::default();
    let json = session.extract(&FileSource::new(&path)).await.unwrap();
    assert_eq!(session.thread().unwrap().max_depth(), depth + 1);

    let parsed = rtr::Thread::from_structured(&json).unwrap();
    assert_eq!(parsed.comment_count(), depth + 1);
    assert_eq!(&parsed, session.thread().unwrap());
    drop(parsed);
    drop(json);

    let markdown = session
        .reconfigure(
            RenderConfig {
                mode: ExtractionMode::Simplify,
                format: OutputFormat::Markdown,
            },
            FilterConfig {
                hide_deleted: true,
                ..FilterConfig::default()
            },
        )
        .unwrap()
        .unwrap();
    let leaf = format!("{}*   **leaf** (Score: 1)\n", "    ".repeat(depth));
    assert!(markdown.contains(&leaf));

    // Pruning near the top takes the whole chain with it.
    let pruned = session
        .reconfigure(
            RenderConfig::default(),
            FilterConfig {
                min_score: 2,
                ..FilterConfig::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(rtr::Thread::from_structured(&pruned)
        .unwrap()
        .comments
        .is_empty());
}
