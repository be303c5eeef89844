// src/exec/backend.rs

//! Pluggable update backend abstraction.
//!
//! The runtime talks to an `UpdateBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake backend in tests.
//!
//! - `ProcessBackend` is the default implementation used by `fwatch`. It
//!   spawns the command's argv directly and waits for it to exit.
//! - Tests can provide their own `UpdateBackend` that, for example, records
//!   each invocation and returns a scripted outcome.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::command::UpdateCommand;

/// Result of one update command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Success,
    /// Exited with a non-zero status (`-1` when killed by a signal).
    Failed(i32),
    /// The process could not be started at all.
    LaunchFailed(String),
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Success)
    }
}

/// Trait abstracting how the update command is executed.
///
/// Implementations must not return before the command has finished: the poll
/// loop relies on updates never overlapping the next scan.
pub trait UpdateBackend: Send {
    fn run_update<'a>(
        &'a mut self,
        command: &'a UpdateCommand,
    ) -> Pin<Box<dyn Future<Output = UpdateOutcome> + Send + 'a>>;
}

/// Real backend used in production.
///
/// The child inherits stdin, stdout and stderr, so its output goes straight
/// to the terminal.
#[derive(Debug, Default, Clone)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl UpdateBackend for ProcessBackend {
    fn run_update<'a>(
        &'a mut self,
        command: &'a UpdateCommand,
    ) -> Pin<Box<dyn Future<Output = UpdateOutcome> + Send + 'a>> {
        Box::pin(async move {
            let mut cmd = Command::new(command.program());
            cmd.args(command.args())
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            match cmd.status().await {
                Ok(status) if status.success() => UpdateOutcome::Success,
                Ok(status) => {
                    let code = status.code().unwrap_or(-1);
                    debug!(cmd = %command, exit_code = code, "update command exited");
                    UpdateOutcome::Failed(code)
                }
                Err(err) => UpdateOutcome::LaunchFailed(err.to_string()),
            }
        })
    }
}
