//! Shell command runner
//!
//! Launches each command through a shell so that pipes, redirections and
//! environment expansion in job specifications behave as they would in a
//! terminal. Output is not captured: the child inherits stdout and stderr.

use std::process::Command;
use tracing::debug;

/// Runs a single command string to completion
pub trait CommandRunner {
    /// Runs `command` and returns its exit code
    ///
    /// `Ok(None)` means the process was terminated by a signal.
    fn run(&self, command: &str) -> std::io::Result<Option<i32>>;
}

/// Runs commands with `<shell> -c <command>`
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
}

impl ShellCommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str) -> std::io::Result<Option<i32>> {
        debug!("Spawning {} -c {:?}", self.shell, command);
        let status = Command::new(&self.shell).arg("-c").arg(command).status()?;
        Ok(status.code())
    }
}
