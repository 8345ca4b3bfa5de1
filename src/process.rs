//! External command execution
//!
//! Thin wrapper over `tokio::process` that captures stdout, stderr, and
//! the exit code. Spawn failures (missing binary) surface as errors;
//! nonzero exits do not, so callers can branch on them.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Trimmed stdout
    pub stdout: String,
    /// Trimmed stderr
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process exited with status zero
    pub success: bool,
}

impl CommandOutput {
    /// Stderr if non-empty, otherwise stdout; for error reporting
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Run `program` with `args` in `cwd` and capture its output
pub async fn run(program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
    debug!("running: {program} {}", args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::CommandFailed(format!("failed to execute {program}: {e}")))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        code: output.status.code(),
        success: output.status.success(),
    })
}
