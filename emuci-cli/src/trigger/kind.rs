//! Job kinds
//!
//! A job kind knows how to generate the parameters its build server job
//! expects. Job names are mapped to kinds through an explicit [`JobRegistry`]
//! built at startup, so new kinds can be added without touching the trigger
//! loop.

use emuci_core::dto::job::{JobParameters, JobSubmission, params};
use std::collections::BTreeMap;

/// Options shared by every job of a trigger invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Group of checkpoints to regress
    pub checkpoint_group: String,
    /// Location of the manifest listing previously failing checkpoint jobs
    pub failed_chpt_job_manifest: Option<String>,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            checkpoint_group: DEFAULT_CHECKPOINT_GROUP.to_string(),
            failed_chpt_job_manifest: None,
        }
    }
}

pub const DEFAULT_CHECKPOINT_GROUP: &str = "linux-firesim-golden";

/// Parameter generation strategy of a build server job
pub trait JobKind: Send + Sync {
    fn generate(&self, branch: &str, options: &TriggerOptions) -> JobParameters;
}

/// Jobs driven by a Jenkinsfile that calls back into `emuci-runner`
///
/// The Jenkinsfile runs the `GIT_STEPS`, `BUILD_STEPS` and `TEST_STEPS`
/// parameters as shell commands; each one invokes the step runner on the
/// job's specification file.
#[derive(Debug, Clone)]
pub struct JenkinsfileJob {
    spec_file: String,
    spec_dir: String,
    runner: String,
}

impl JenkinsfileJob {
    pub fn new(spec_file: impl Into<String>) -> Self {
        Self {
            spec_file: spec_file.into(),
            spec_dir: "./CI".to_string(),
            runner: "emuci-runner".to_string(),
        }
    }

    fn step_command(&self, group: &str) -> String {
        format!(
            "{} {}/{} {}",
            self.runner, self.spec_dir, self.spec_file, group
        )
    }
}

impl JobKind for JenkinsfileJob {
    fn generate(&self, branch: &str, options: &TriggerOptions) -> JobParameters {
        let mut parameters = JobParameters::new();
        parameters.insert(params::BRANCH.to_string(), branch.to_string());
        parameters.insert(
            params::CHECKPOINT_GROUP.to_string(),
            options.checkpoint_group.clone(),
        );
        if let Some(manifest) = &options.failed_chpt_job_manifest {
            parameters.insert(
                params::FAILED_CHPT_JOB_MANIFEST.to_string(),
                manifest.clone(),
            );
        }
        for group in [params::GIT_STEPS, params::BUILD_STEPS, params::TEST_STEPS] {
            parameters.insert(group.to_string(), self.step_command(group));
        }
        parameters
    }
}

/// Job name to job kind mapping
#[derive(Default)]
pub struct JobRegistry {
    kinds: BTreeMap<String, Box<dyn JobKind>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The jobs defined for the emulator project
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("riscvemu", JenkinsfileJob::new("riscvemu.json"));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, kind: impl JobKind + 'static) {
        self.kinds.insert(name.into(), Box::new(kind));
    }

    pub fn get(&self, name: &str) -> Option<&dyn JobKind> {
        self.kinds.get(name).map(|kind| kind.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Fails on the first job name that is not registered
    pub fn ensure_known<'a>(
        &self,
        jobs: impl IntoIterator<Item = &'a String>,
    ) -> anyhow::Result<()> {
        for job in jobs {
            if self.get(job).is_none() {
                anyhow::bail!(
                    "Unknown job '{}' (available: {})",
                    job,
                    self.names().collect::<Vec<_>>().join(", ")
                );
            }
        }
        Ok(())
    }

    /// Builds the submission for `job`, if it is registered
    pub fn submission(
        &self,
        job: &str,
        branch: &str,
        options: &TriggerOptions,
    ) -> Option<JobSubmission> {
        self.get(job)
            .map(|kind| JobSubmission::new(job, kind.generate(branch, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jenkinsfile_parameters() {
        let params = JenkinsfileJob::new("riscvemu.json")
            .generate("feature/uart", &TriggerOptions::default());

        assert_eq!(params["BRANCH"], "feature/uart");
        assert_eq!(params["CHECKPOINT_GROUP"], "linux-firesim-golden");
        let command = |group: &str| format!("emuci-runner ./CI/riscvemu.json {group}");
        assert_eq!(params["GIT_STEPS"], command("GIT_STEPS"));
        assert_eq!(params["BUILD_STEPS"], command("BUILD_STEPS"));
        assert_eq!(params["TEST_STEPS"], command("TEST_STEPS"));
        assert!(!params.contains_key("FAILED_CHPT_JOB_MANIFEST"));
    }

    #[test]
    fn test_failed_manifest_is_forwarded() {
        let options = TriggerOptions {
            checkpoint_group: "smoke".to_string(),
            failed_chpt_job_manifest: Some("s3://ci/run-17/job_manifest.json.gz".to_string()),
        };

        let params = JenkinsfileJob::new("riscvemu.json").generate("master", &options);

        assert_eq!(params["CHECKPOINT_GROUP"], "smoke");
        assert_eq!(
            params["FAILED_CHPT_JOB_MANIFEST"],
            "s3://ci/run-17/job_manifest.json.gz"
        );
        assert_eq!(
            params["TEST_STEPS"],
            "emuci-runner ./CI/riscvemu.json TEST_STEPS"
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = JobRegistry::builtin();

        assert!(registry.get("riscvemu").is_some());
        assert!(registry.get("spike").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["riscvemu"]);

        let submission = registry
            .submission("riscvemu", "master", &TriggerOptions::default())
            .unwrap();
        assert_eq!(submission.job, "riscvemu");
        assert_eq!(submission.parameters["BRANCH"], "master");
    }

    #[test]
    fn test_registry_accepts_new_kinds() {
        struct Fixed;
        impl JobKind for Fixed {
            fn generate(&self, branch: &str, _options: &TriggerOptions) -> JobParameters {
                JobParameters::from([("REF".to_string(), branch.to_string())])
            }
        }

        let mut registry = JobRegistry::builtin();
        registry.register("spike", Fixed);

        let submission = registry
            .submission("spike", "dev", &TriggerOptions::default())
            .unwrap();
        assert_eq!(submission.parameters["REF"], "dev");
    }

    #[test]
    fn test_ensure_known() {
        let registry = JobRegistry::builtin();
        let jobs = vec!["riscvemu".to_string(), "qemu".to_string()];

        let err = registry.ensure_known(&jobs).unwrap_err();
        assert!(err.to_string().contains("Unknown job 'qemu'"));
        assert!(registry.ensure_known(&jobs[..1]).is_ok());
    }
}
