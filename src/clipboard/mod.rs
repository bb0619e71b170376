//! Clipboard hand-off for rendered output.
//!
//! Pipes text into whichever platform tool is installed (pbcopy on macOS;
//! wl-copy, xclip or xsel on Linux).

mod copy;
mod error;
mod result;
mod tool;

pub use copy::Copy;
pub use error::ClipboardError;
pub use result::{CopyMethod, CopyResult};
pub use tool::{platform_tools, CopyTool, CopyToolError, PipeTool};
