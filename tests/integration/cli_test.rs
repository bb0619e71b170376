//! Integration tests for the rtr CLI

use std::process::Command;
use tempfile::TempDir;

use crate::helpers::{deep_export, fixtures_dir, load_fixture, temp_fixture};

/// Run rtr with an isolated (missing) config file.
fn run_rtr(args: &[&str]) -> (String, String, i32) {
    let config_dir = TempDir::new().unwrap();
    run_rtr_with_config(args, &config_dir.path().join("config.toml"))
}

fn run_rtr_with_config(args: &[&str], config: &std::path::Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_rtr"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("RTR_CONFIG", config)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute rtr");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn export_path() -> String {
    fixtures_dir()
        .join("thread_export.json")
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Help and Parsing
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_rtr(&["--help"]);

    assert_eq!(exit_code, 0);
    for name in ["extract", "render", "config", "completions"] {
        assert!(stdout.contains(name), "missing {name} in help: {stdout}");
    }
}

#[test]
fn extract_without_source_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_rtr(&["extract"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("required"));
}

#[test]
fn unknown_format_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_rtr(&["extract", "-i", &export_path(), "-f", "html"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("html"));
}

// ============================================================================
// Extract
// ============================================================================

#[test]
fn extract_json_applies_default_filters() {
    let (stdout, stderr, exit_code) = run_rtr(&["extract", "--input", &export_path()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.ends_with("}\n") && !stdout.ends_with("\n\n"));
    let thread = rtr::Thread::from_structured(&stdout).unwrap();
    assert_eq!(thread.post.title, "What crate do you reach for first?");
    // bob (-2) falls under the default threshold of 0.
    let authors: Vec<_> = rtr::thread::walk(&thread.comments)
        .map(|(c, _)| c.author.clone())
        .collect();
    assert_eq!(authors, ["AutoModerator", "alice", "[deleted]", "carol", "dave"]);
}

#[test]
fn extract_markdown_with_filters() {
    let (stdout, stderr, exit_code) = run_rtr(&[
        "extract",
        "-i",
        &export_path(),
        "--format",
        "markdown",
        "--hide-deleted",
        "--hide-automod",
    ]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    let expected = "\
# What crate do you reach for first?

**URL:** [https://www.reddit.com/r/rust/comments/abc123/what_crate/](https://www.reddit.com/r/rust/comments/abc123/what_crate/)
**Author:** ferris | **Score:** 42

> Starting a new CLI.
> Curious what people use.

---

### Comments

*   **alice** (Score: 17)
    > clap, every time.

*   **dave** (Score: 5)
    > [deleted]

";
    assert_eq!(stdout, expected);
}

#[test]
fn extract_all_mode_ignores_filter_flags() {
    let (stdout, _stderr, exit_code) = run_rtr(&[
        "extract",
        "-i",
        &export_path(),
        "--mode",
        "all",
        "--hide-deleted",
        "--hide-automod",
        "--min-score",
        "100",
    ]);

    assert_eq!(exit_code, 0);
    let thread = rtr::Thread::from_structured(&stdout).unwrap();
    assert_eq!(thread.comment_count(), 6);
}

#[test]
fn extract_reads_stdin() {
    assert_cmd::Command::new(env!("CARGO_BIN_EXE_rtr"))
        .args(["extract", "-i", "-", "-f", "outline"])
        .env("RTR_CONFIG", "/nonexistent/rtr/config.toml")
        .write_stdin(load_fixture("thread_export.json"))
        .assert()
        .success()
        .stdout(predicates::str::starts_with(
            "# What crate do you reach for first?",
        ))
        .stdout(predicates::str::contains("**carol** (Score: 8)"));
}

#[test]
fn invalid_url_is_rejected_before_fetching() {
    let (stdout, stderr, exit_code) = run_rtr(&["extract", "https://example.com/not/reddit"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid Reddit post URL"));
}

#[test]
fn envelope_reports_validation_error() {
    let (stdout, _stderr, exit_code) =
        run_rtr(&["extract", "https://example.com/not/reddit", "--envelope"]);

    assert_eq!(exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid Reddit post URL"));
    assert!(value.get("data").is_none());
}

#[test]
fn envelope_wraps_output() {
    let (stdout, _stderr, exit_code) = run_rtr(&[
        "extract",
        "-i",
        &export_path(),
        "-f",
        "markdown",
        "--envelope",
    ]);

    assert_eq!(exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["success"], true);
    assert!(value["data"].as_str().unwrap().contains("**alice** (Score: 17)"));
}

#[test]
fn malformed_export_reports_malformed_data() {
    let path = fixtures_dir().join("malformed.html");
    let (_stdout, stderr, exit_code) = run_rtr(&["extract", "-i", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Received malformed data from Reddit"));
}

#[test]
fn wrong_shape_reports_structure_error() {
    let path = fixtures_dir().join("not_a_thread.json");
    let (_stdout, stderr, exit_code) = run_rtr(&["extract", "-i", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Could not parse Reddit data structure"));
}

#[test]
fn missing_input_file_is_acquisition_error() {
    let (_stdout, stderr, exit_code) = run_rtr(&["extract", "-i", "/no/such/export.json"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("/no/such/export.json"));
}

#[test]
fn deep_export_does_not_overflow_the_stack() {
    let depth = 2_000;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep.json");
    std::fs::write(&path, deep_export(depth)).unwrap();
    let path = path.to_str().unwrap();

    let (stdout, stderr, exit_code) = run_rtr(&["extract", "-i", path, "-f", "markdown"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains(&format!("{}*   **leaf** (Score: 1)\n", "    ".repeat(depth))));

    let (stdout, stderr, exit_code) = run_rtr(&["extract", "-i", path, "-f", "json"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    let thread = rtr::Thread::from_structured(&stdout).unwrap();
    assert_eq!(thread.max_depth(), depth + 1);

    let saved = dir.path().join("thread.json");
    std::fs::write(&saved, &stdout).unwrap();
    let (stdout, stderr, exit_code) =
        run_rtr(&["render", saved.to_str().unwrap(), "-f", "markdown"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.ends_with("> bottom\n\n"));
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn render_refilters_structured_output() {
    let (json, _stderr, exit_code) = run_rtr(&["extract", "-i", &export_path(), "-m", "all"]);
    assert_eq!(exit_code, 0);

    let dir = TempDir::new().unwrap();
    let saved = dir.path().join("thread.json");
    std::fs::write(&saved, json).unwrap();

    let (stdout, stderr, exit_code) = run_rtr(&[
        "render",
        saved.to_str().unwrap(),
        "--min-score",
        "10",
        "-f",
        "markdown",
    ]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("**alice** (Score: 17)"));
    assert!(!stdout.contains("carol"));
    assert!(!stdout.contains("dave"));
}

#[test]
fn render_rejects_raw_export() {
    let (_temp, path) = temp_fixture("thread_export.json");
    let (_stdout, stderr, exit_code) = run_rtr(&["render", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("not a structured thread"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_file_sets_defaults_and_flags_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[output]\nformat = \"markdown\"\n\n[filters]\nhide_automoderator = true\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) =
        run_rtr_with_config(&["extract", "-i", &export_path()], &config);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("# "));
    assert!(!stdout.contains("AutoModerator"));

    let (stdout, _stderr, exit_code) =
        run_rtr_with_config(&["extract", "-i", &export_path(), "-f", "json"], &config);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with('{'));
}

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_rtr(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[output]"));
    assert!(stdout.contains("mode = \"simplify\""));
    assert!(stdout.contains("format = \"json\""));
    assert!(stdout.contains("timeout_secs = 10"));
}

#[test]
fn config_path_honours_env() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    let (stdout, _stderr, exit_code) = run_rtr_with_config(&["config", "path"], &config);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), config.to_str().unwrap());
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.toml");

    let (stdout, stderr, exit_code) = run_rtr_with_config(&["config", "init"], &config);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Wrote default config"));
    let written = std::fs::read_to_string(&config).unwrap();
    assert_eq!(rtr::Config::parse(&written).unwrap(), rtr::Config::default());

    let (_stdout, stderr, exit_code) = run_rtr_with_config(&["config", "init"], &config);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--force"));

    let (_stdout, _stderr, exit_code) =
        run_rtr_with_config(&["config", "init", "--force"], &config);
    assert_eq!(exit_code, 0);
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[output]\nformat = \"html\"\n").unwrap();

    let (_stdout, stderr, exit_code) =
        run_rtr_with_config(&["extract", "-i", &export_path()], &config);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid config"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_generate_for_bash() {
    let (stdout, _stderr, exit_code) = run_rtr(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("rtr"));
    assert!(stdout.contains("extract"));
}
