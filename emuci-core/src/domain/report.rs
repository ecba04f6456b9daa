//! Test report domain types
//!
//! A report is a list of suites, each holding the pass/fail outcome of its
//! test cases in the order they were aggregated.

use serde::{Deserialize, Serialize};

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseOutcome {
    Passed,
    /// Failed, with a diagnostic pointing at the source artifact
    Failed { message: String },
}

/// One test case, backed by a result artifact on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// Suite key the case belongs to
    pub classname: String,
    /// Path of the artifact the outcome was read from
    pub file: String,
    pub outcome: CaseOutcome,
}

impl TestCase {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            CaseOutcome::Passed => None,
            CaseOutcome::Failed { message } => Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>, cases: Vec<TestCase>) -> Self {
        Self {
            name: name.into(),
            cases,
        }
    }

    pub fn failures(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub suites: Vec<TestSuite>,
}

impl TestReport {
    pub fn total_cases(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.suites.iter().map(TestSuite::failures).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, outcome: CaseOutcome) -> TestCase {
        TestCase {
            name: name.to_string(),
            classname: "boot-linux".to_string(),
            file: format!("/out/boot-linux-{name}.riscvemu"),
            outcome,
        }
    }

    #[test]
    fn test_report_totals() {
        let report = TestReport {
            suites: vec![
                TestSuite::new(
                    "boot-linux",
                    vec![
                        case("smp", CaseOutcome::Passed),
                        case(
                            "up",
                            CaseOutcome::Failed {
                                message: "Error see log: /out/boot-linux-up.riscvemu".into(),
                            },
                        ),
                    ],
                ),
                TestSuite::new("csr-write", vec![case("mstatus", CaseOutcome::Passed)]),
            ],
        };

        assert_eq!(report.total_cases(), 3);
        assert_eq!(report.total_failures(), 1);
        assert_eq!(report.suites[0].failures(), 1);
        assert!(report.suites[0].cases[1]
            .failure_message()
            .unwrap()
            .contains("boot-linux-up"));
    }

    #[test]
    fn test_empty_report() {
        let report = TestReport::default();
        assert!(report.is_empty());
        assert_eq!(report.total_cases(), 0);
    }
}
