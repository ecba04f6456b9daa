//! Execution service
//!
//! Executes one step group of a job specification:
//! - Validating the group exists before anything runs
//! - Running its commands one by one, in file order
//! - Stopping at the first command that does not exit 0
//!
//! No rollback is attempted for steps that already ran; steps are expected to
//! be idempotent or recoverable by the next run.

use chrono::Utc;
use emuci_core::domain::spec::JobSpec;
use emuci_core::domain::step::{StepGroupReport, StepRecord};
use std::time::Instant;
use tracing::{error, info};

use crate::execution::StepError;
use crate::service::shell::{CommandRunner, ShellCommandRunner};

/// Service trait for executing step groups
pub trait ExecutionService {
    /// Executes every command of `group`, failing fast
    ///
    /// # Returns
    /// The record of all commands, which all succeeded
    fn execute_group(&self, spec: &JobSpec, group: &str) -> Result<StepGroupReport, StepError>;
}

/// Standard implementation of ExecutionService
pub struct StandardExecutionService<R: CommandRunner = ShellCommandRunner> {
    runner: R,
}

impl<R: CommandRunner> StandardExecutionService<R> {
    /// Creates a new execution service on top of a command runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ExecutionService for StandardExecutionService<R> {
    fn execute_group(&self, spec: &JobSpec, group: &str) -> Result<StepGroupReport, StepError> {
        let commands = spec.group(group)?;
        let mut report = StepGroupReport::new(group);

        info!("Running step group {} ({} step(s))", group, commands.len());

        for (idx, command) in commands.iter().enumerate() {
            info!("Executing: {}", command);

            let started_at = Utc::now();
            let clock = Instant::now();
            let outcome = self.runner.run(command);
            let duration_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);

            let exit_code = match outcome {
                Ok(exit_code) => exit_code,
                Err(source) => {
                    error!("Failed to launch step {}: {}", idx + 1, source);
                    return Err(StepError::Launch {
                        command: command.clone(),
                        source,
                        report,
                    });
                }
            };

            let step = StepRecord {
                command: command.clone(),
                exit_code,
                started_at,
                duration_ms,
            };
            let succeeded = step.succeeded();
            report.record(step);

            if !succeeded {
                error!(
                    "Step {}/{} failed after {}ms: {}",
                    idx + 1,
                    commands.len(),
                    duration_ms,
                    command
                );
                return Err(StepError::StepFailed {
                    command: command.clone(),
                    exit_code,
                    report,
                });
            }

            info!(
                "Step {}/{} completed in {}ms",
                idx + 1,
                commands.len(),
                duration_ms
            );
        }

        info!(
            "Step group {} completed ({} step(s), {}ms)",
            group,
            report.completed(),
            report.total_duration_ms()
        );

        Ok(report)
    }
}
