//! Execution of the assembled command line as a child process.
//!
//! The command line is handed to the platform shell (`cmd /S /C` on Windows,
//! `sh -c` elsewhere) exactly as joined, so quoting is the caller's job.
//! Standard output is captured and split into lines; standard error is
//! passed through to the parent.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error};

use crate::command::CommandLine;

/// Errors from running the child process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The shell or tool could not be started.
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process ended without an exit code (killed by a signal).
    #[error("Process was terminated without an exit code: {command}")]
    Terminated {
        /// The command line that was run.
        command: String,
    },
}

/// Exit code and captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Process exit code.
    pub exit_code: i32,
    /// Raw standard output lines, trailing whitespace removed.
    pub stdout: Vec<Vec<u8>>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Create a result from an exit code and raw output lines.
    pub fn new(exit_code: i32, stdout: Vec<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stdout,
            duration_ms: 0,
        }
    }

    /// Whether the process exited with code zero.
    pub fn is_successful(&self) -> bool {
        self.exit_code == 0
    }

    /// Split raw output into lines.
    ///
    /// Lines break on `\n`; trailing whitespace (including `\r`) is
    /// stripped from each line and a final empty line is dropped.
    pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut lines: Vec<Vec<u8>> = bytes
            .split(|b| *b == b'\n')
            .map(|line| line.trim_ascii_end().to_vec())
            .collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }
}

/// Runs a command line and captures its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` to completion.
    async fn run(&self, command: &CommandLine) -> Result<ExecutionResult, ProcessError>;
}

/// Runs command lines through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a shell runner.
    pub fn new() -> Self {
        Self
    }

    /// Raw argument string for `cmd.exe`: `/S /C "<line>"`.
    ///
    /// With `/S`, cmd removes only the outer quote pair.
    pub fn cmd_arguments(line: &str) -> String {
        format!("/S /C \"{line}\"")
    }

    #[cfg(windows)]
    fn shell_command(line: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.raw_arg(Self::cmd_arguments(line));
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(line: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    }
}

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(&self, command: &CommandLine) -> Result<ExecutionResult, ProcessError> {
        let line = command.to_string();
        let start = Instant::now();

        debug!(command = %line, "Spawning translation tool");

        let output = Self::shell_command(&line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| {
                error!(command = %line, error = %source, "Failed to spawn translation tool");
                ProcessError::Spawn {
                    command: line.clone(),
                    source,
                }
            })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        let Some(exit_code) = output.status.code() else {
            error!(command = %line, "Translation tool terminated without exit code");
            return Err(ProcessError::Terminated { command: line });
        };

        let stdout = ExecutionResult::split_lines(&output.stdout);
        debug!(exit_code, lines = stdout.len(), duration_ms, "Translation tool exited");

        Ok(ExecutionResult {
            exit_code,
            stdout,
            duration_ms,
        })
    }
}
