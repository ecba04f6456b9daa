//! Job trigger
//!
//! Submits jobs to the build server and waits for each one to start running.
//! Jobs are processed strictly one after another (submit, poll, report); a
//! job that fails to start never prevents the next one from being submitted.

pub mod git;
pub mod kind;
pub mod poller;

use emuci_client::BuildServer;
use emuci_core::dto::queue::Executable;
use tracing::{debug, error, info};

pub use kind::{JobRegistry, TriggerOptions};
use poller::{QueueState, RetryPolicy, wait_for_executable};

/// What happened to one job of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The job left the queue and is running
    Started { job: String, executable: Executable },
    /// The queue item never resolved within the retry budget
    NotStarted {
        job: String,
        queue_id: u64,
        attempts: u32,
    },
    /// The job could not be submitted or its queue item could not be read
    Failed { job: String, error: String },
}

impl JobOutcome {
    pub fn started(&self) -> bool {
        matches!(self, JobOutcome::Started { .. })
    }
}

/// Triggers jobs from a registry on a build server
pub struct Trigger<'a> {
    server: &'a dyn BuildServer,
    registry: &'a JobRegistry,
    policy: RetryPolicy,
}

impl<'a> Trigger<'a> {
    pub fn new(server: &'a dyn BuildServer, registry: &'a JobRegistry) -> Self {
        Self {
            server,
            registry,
            policy: RetryPolicy::default(),
        }
    }

    /// Triggers every job in order, returning one outcome per job
    pub async fn run_batch(
        &self,
        jobs: &[String],
        branch: &str,
        options: &TriggerOptions,
    ) -> Vec<JobOutcome> {
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            outcomes.push(self.run_one(job, branch, options).await);
        }
        outcomes
    }

    async fn run_one(&self, job: &str, branch: &str, options: &TriggerOptions) -> JobOutcome {
        let Some(submission) = self.registry.submission(job, branch, options) else {
            return JobOutcome::Failed {
                job: job.to_string(),
                error: "job is not registered".to_string(),
            };
        };
        debug!("Parameters for {}: {:?}", job, submission.parameters);

        let queue_id = match self
            .server
            .submit_job(&submission.job, &submission.parameters)
            .await
        {
            Ok(queue_id) => queue_id,
            Err(e) => {
                error!("Failed to submit job {}: {}", job, e);
                return JobOutcome::Failed {
                    job: job.to_string(),
                    error: e.to_string(),
                };
            }
        };
        info!(
            "Submitted {} on branch {} as queue item {}",
            job, branch, queue_id
        );

        match wait_for_executable(self.server, queue_id, &self.policy).await {
            Ok(QueueState::Resolved { executable, .. }) => JobOutcome::Started {
                job: job.to_string(),
                executable,
            },
            Ok(state) => {
                error!("No Job found for queued item: {}", queue_id);
                JobOutcome::NotStarted {
                    job: job.to_string(),
                    queue_id,
                    attempts: state.attempts(),
                }
            }
            Err(e) => {
                error!(
                    "Failed to poll queue item {} of job {}: {}",
                    queue_id, job, e
                );
                JobOutcome::Failed {
                    job: job.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }
}
