//! External command execution
//!
//! Every Termux:API facility is a separate program. Whatever happens while
//! running one (non-zero exit, spawn failure, timeout) comes back as a
//! [`CommandOutput`] so callers can turn it into result text.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tooling::async_utils::timeout::{with_timeout, TimeoutError};
use tracing::{debug, warn};

/// Default bound on a single external command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Status reported when the command never produced an exit code
pub const FAILED_STATUS: i32 = -1;

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A command that exited with status 0
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A command that never ran to completion
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            status: FAILED_STATUS,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs platform utilities
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, capturing stdout and stderr
    async fn run(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        debug!(program, args = args.len(), "Running command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match with_timeout(self.timeout, command.output()).await {
            Ok(output) => CommandOutput {
                status: output.status.code().unwrap_or(FAILED_STATUS),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(TimeoutError::Timeout(elapsed)) => {
                warn!(program, timeout_secs = elapsed.as_secs(), "Command timed out");
                CommandOutput::failed("Command timed out")
            }
            Err(TimeoutError::OperationFailed(e)) => {
                warn!(program, error = %e, "Command failed to start");
                CommandOutput::failed(e.to_string())
            }
        }
    }
}
