//! CopyTool trait and the stdin-pipe implementation shared by all
//! platform tools.

use super::result::CopyMethod;
use std::io::Write;
use std::process::{Child, Command, Stdio};

/// A tool that can put text on the system clipboard.
pub trait CopyTool: Send + Sync {
    /// The method identifier for this tool.
    fn method(&self) -> CopyMethod;

    /// Human-readable name for error messages.
    fn name(&self) -> &'static str {
        self.method().name()
    }

    /// Check if this tool is available on the system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Try to copy text content to the clipboard.
    fn try_copy_text(&self, text: &str) -> Result<(), CopyToolError>;
}

/// Error from a specific tool operation.
#[derive(Debug, Clone)]
pub enum CopyToolError {
    /// Tool execution failed
    Failed(String),
    /// Tool not found on system
    NotFound,
}

/// A clipboard program that reads the text to copy from stdin.
pub struct PipeTool {
    method: CopyMethod,
    args: &'static [&'static str],
}

impl PipeTool {
    pub const fn new(method: CopyMethod, args: &'static [&'static str]) -> Self {
        Self { method, args }
    }

    pub fn pbcopy() -> Self {
        Self::new(CopyMethod::Pbcopy, &[])
    }

    pub fn xclip() -> Self {
        Self::new(CopyMethod::Xclip, &["-selection", "clipboard"])
    }

    pub fn xsel() -> Self {
        Self::new(CopyMethod::Xsel, &["--clipboard", "--input"])
    }

    pub fn wl_copy() -> Self {
        Self::new(CopyMethod::WlCopy, &[])
    }

    fn program(&self) -> &'static str {
        self.method.name()
    }

    /// Check if the program is on PATH.
    fn tool_exists(&self) -> bool {
        Command::new("which")
            .arg(self.program())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl CopyTool for PipeTool {
    fn method(&self) -> CopyMethod {
        self.method
    }

    fn is_available(&self) -> bool {
        let platform = match self.method {
            CopyMethod::Pbcopy => cfg!(target_os = "macos"),
            _ => cfg!(target_os = "linux"),
        };
        platform && self.tool_exists()
    }

    fn try_copy_text(&self, text: &str) -> Result<(), CopyToolError> {
        let mut child = Command::new(self.program())
            .args(self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CopyToolError::NotFound,
                _ => CopyToolError::Failed(e.to_string()),
            })?;

        feed_stdin(&mut child, text)?;

        let status = child
            .wait()
            .map_err(|e| CopyToolError::Failed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(CopyToolError::Failed(format!("{} failed", self.program())))
        }
    }
}

/// Write `text` to the child's stdin and close it. If the write fails the
/// child is killed and reaped before the error is returned.
fn feed_stdin(child: &mut Child, text: &str) -> Result<(), CopyToolError> {
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(CopyToolError::Failed(e.to_string()));
    }
    Ok(())
}

/// Get the platform-appropriate tools in priority order.
pub fn platform_tools() -> Vec<Box<dyn CopyTool>> {
    #[cfg(target_os = "macos")]
    {
        vec![Box::new(PipeTool::pbcopy())]
    }

    #[cfg(target_os = "linux")]
    {
        vec![
            Box::new(PipeTool::wl_copy()),
            Box::new(PipeTool::xclip()),
            Box::new(PipeTool::xsel()),
        ]
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        vec![]
    }
}
