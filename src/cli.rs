//! Command-line definitions.
//!
//! Kept in the library so completions and docs can be generated from the
//! same definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::Config;
use crate::filter::{ExtractionMode, FilterConfig};
use crate::render::{OutputFormat, RenderConfig};

/// Reddit Thread Reducer - turn a discussion thread into clean JSON or a Markdown outline.
#[derive(Debug, Parser)]
#[command(name = "rtr", version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract a thread and print it as JSON or Markdown
    Extract(ExtractArgs),

    /// Re-filter and re-render a saved JSON document without fetching
    Render(RenderArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with every setting at its default
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["url", "input"])))]
pub struct ExtractArgs {
    /// Post URL, e.g. https://www.reddit.com/r/rust/comments/abc123/title/
    pub url: Option<String>,

    /// Read a saved export from FILE instead of fetching ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Give up fetching after SECS seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also copy the output to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Print a {"success", "data", "error"} JSON envelope instead of raw output
    #[arg(long)]
    pub envelope: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Structured JSON produced by `rtr extract --format json` ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Also copy the output to the clipboard
    #[arg(long)]
    pub copy: bool,
}

/// Mode, format and filter flags shared by `extract` and `render`.
#[derive(Debug, Default, Args)]
pub struct ViewArgs {
    /// Extraction mode (filters only apply in simplify mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ExtractionMode>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Hide comments whose author and body are both deleted or removed
    #[arg(long)]
    pub hide_deleted: bool,

    /// Hide comments posted by AutoModerator
    #[arg(long = "hide-automod")]
    pub hide_automoderator: bool,

    /// Hide comments scored below N (non-numeric input counts as 0)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub min_score: Option<String>,
}

impl ViewArgs {
    /// Layer these flags over the configured defaults. Boolean flags can only
    /// switch a filter on.
    pub fn resolve(&self, config: &Config) -> (RenderConfig, FilterConfig) {
        let render = RenderConfig {
            mode: self.mode.unwrap_or(config.output.mode),
            format: self.format.unwrap_or(config.output.format),
        };
        let filters = FilterConfig {
            hide_deleted: self.hide_deleted || config.filters.hide_deleted,
            hide_automoderator: self.hide_automoderator || config.filters.hide_automoderator,
            min_score: self
                .min_score
                .as_deref()
                .map(FilterConfig::parse_min_score)
                .unwrap_or(config.filters.min_score),
        };
        (render, filters)
    }
}
