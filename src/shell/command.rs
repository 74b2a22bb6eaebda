//! Process execution.
//!
//! Launch commands are argv vectors taken straight from launcher probes, so
//! they are spawned directly and never passed through a shell.

use crate::error::{PioneerError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of running a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Stdout followed by stderr.
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }
}

/// Render an argv vector for log messages.
pub fn display_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `argv[0]` with `argv[1..]` as arguments and wait for it to exit.
///
/// Both output streams are captured. A non-zero exit is reported in the
/// result, not as an error.
///
/// # Errors
///
/// Returns `CommandFailed` when `argv` is empty and `CommandSpawn`, carrying
/// the I/O error, when the process cannot be started.
pub fn execute_argv(argv: &[String]) -> Result<CommandResult> {
    let Some((program, args)) = argv.split_first() else {
        return Err(PioneerError::CommandFailed {
            command: String::new(),
            code: None,
        });
    };

    let start = Instant::now();
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| PioneerError::CommandSpawn {
            command: display_argv(argv),
            source,
        })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}
