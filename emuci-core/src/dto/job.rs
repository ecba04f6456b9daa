//! Job submission DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed parameters sent along with a job submission
///
/// Ordered so that logs and requests are stable across runs.
pub type JobParameters = BTreeMap<String, String>;

/// Parameter names understood by the Jenkinsfile-based jobs
pub mod params {
    pub const BRANCH: &str = "BRANCH";
    pub const CHECKPOINT_GROUP: &str = "CHECKPOINT_GROUP";
    pub const FAILED_CHPT_JOB_MANIFEST: &str = "FAILED_CHPT_JOB_MANIFEST";
    pub const GIT_STEPS: &str = "GIT_STEPS";
    pub const BUILD_STEPS: &str = "BUILD_STEPS";
    pub const TEST_STEPS: &str = "TEST_STEPS";
}

/// A named job plus the parameters to trigger it with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub job: String,
    pub parameters: JobParameters,
}

impl JobSubmission {
    pub fn new(job: impl Into<String>, parameters: JobParameters) -> Self {
        Self {
            job: job.into(),
            parameters,
        }
    }
}
