//! Execution types for the step runner
//!
//! These types only exist at runtime while a step group is executing.

use emuci_core::domain::spec::SpecError;
use emuci_core::domain::step::StepGroupReport;
use thiserror::Error;

/// Errors that abort a step group
#[derive(Debug, Error)]
pub enum StepError {
    /// The job specification could not be used (missing group, bad file)
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A command exited unsuccessfully; later commands were not attempted
    #[error("Step failed: '{command}' {}", describe_status(.exit_code))]
    StepFailed {
        command: String,
        exit_code: Option<i32>,
        report: StepGroupReport,
    },

    /// The shell could not be started for a command
    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
        report: StepGroupReport,
    },
}

impl StepError {
    /// Process exit code to report for this error
    ///
    /// Step failures forward the failing command's exit code when it fits in a
    /// process status; configuration problems exit with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            StepError::Spec(_) => 2,
            StepError::StepFailed { exit_code, .. } => exit_code
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            StepError::Launch { .. } => 1,
        }
    }

    /// Commands attempted before the group was aborted
    pub fn report(&self) -> Option<&StepGroupReport> {
        match self {
            StepError::Spec(_) => None,
            StepError::StepFailed { report, .. } | StepError::Launch { report, .. } => Some(report),
        }
    }
}

fn describe_status(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failed_message() {
        let err = StepError::StepFailed {
            command: "make -j8".to_string(),
            exit_code: Some(2),
            report: StepGroupReport::new("BUILD_STEPS"),
        };

        assert_eq!(
            err.to_string(),
            "Step failed: 'make -j8' exited with status 2"
        );
        assert_eq!(err.exit_code(), 2);
        assert!(err.report().is_some());
    }

    #[test]
    fn test_signal_and_out_of_range_codes_map_to_one() {
        let killed = StepError::StepFailed {
            command: "sleep 600".to_string(),
            exit_code: None,
            report: StepGroupReport::new("TEST_STEPS"),
        };
        assert!(killed.to_string().contains("terminated by a signal"));
        assert_eq!(killed.exit_code(), 1);

        let odd = StepError::StepFailed {
            command: "exit -1".to_string(),
            exit_code: Some(-1),
            report: StepGroupReport::new("TEST_STEPS"),
        };
        assert_eq!(odd.exit_code(), 1);
    }

    #[test]
    fn test_missing_group_exit_code() {
        let err = StepError::from(SpecError::StepGroupNotFound {
            group: "DEPLOY_STEPS".to_string(),
            available: "BUILD_STEPS".to_string(),
        });

        assert_eq!(err.exit_code(), 2);
        assert!(err.report().is_none());
        assert!(err.to_string().contains("DEPLOY_STEPS"));
    }
}
