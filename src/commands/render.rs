//! Render subcommand handler

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};

use rtr::cli::RenderArgs;
use rtr::fetch::STDIN_PATH;
use rtr::{process, Config, Thread};

/// Re-filter and re-render a structured JSON document.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: RenderArgs) -> Result<()> {
    let config = Config::load()?;
    let (render, filters) = args.view.resolve(&config);

    let text = if args.file.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?
    };

    let thread = Thread::from_structured(&text)
        .with_context(|| format!("{} is not a structured thread", args.file.display()))?;
    let output = process(&thread, &render, &filters)?;
    super::emit(&output, args.copy)
}
