//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod extract;
pub mod render;

use anyhow::Result;
use rtr::clipboard::Copy;

/// Print `output` as-is (plus a final newline if it lacks one) and
/// optionally put it on the clipboard. A clipboard failure is reported but
/// does not fail the command.
#[cfg(not(tarpaulin_include))]
pub fn emit(output: &str, copy: bool) -> Result<()> {
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    if copy {
        match Copy::new().text(output) {
            Ok(result) => eprintln!("{}", result.message()),
            Err(err) => eprintln!("Warning: {err}"),
        }
    }
    Ok(())
}
