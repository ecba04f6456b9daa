//! Step execution records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single shell command of a step group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub command: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl StepRecord {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Ordered record of the commands attempted for one step group
///
/// Built incrementally; execution stops at the first failing command, so a
/// failure can only ever be the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepGroupReport {
    pub group: String,
    pub steps: Vec<StepRecord>,
}

impl StepGroupReport {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// Number of commands that completed successfully
    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|s| s.succeeded()).count()
    }

    /// The failing command, if any
    pub fn failure(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|s| !s.succeeded())
    }

    pub fn succeeded(&self) -> bool {
        self.failure().is_none()
    }

    /// Total wall-clock time spent in the attempted commands
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(command: &str, exit_code: Option<i32>) -> StepRecord {
        StepRecord {
            command: command.to_string(),
            exit_code,
            started_at: Utc::now(),
            duration_ms: 5,
        }
    }

    #[test]
    fn test_group_report_failure() {
        let mut report = StepGroupReport::new("BUILD_STEPS");
        report.record(step("make clean", Some(0)));
        report.record(step("make", Some(2)));

        assert!(!report.succeeded());
        assert_eq!(report.completed(), 1);
        assert_eq!(report.failure().unwrap().command, "make");
        assert_eq!(report.total_duration_ms(), 10);
    }

    #[test]
    fn test_signal_termination_is_failure() {
        assert!(!step("sleep 100", None).succeeded());
    }

    #[test]
    fn test_empty_group_succeeds() {
        let report = StepGroupReport::new("TEST_STEPS");
        assert!(report.succeeded());
        assert_eq!(report.completed(), 0);
    }
}
