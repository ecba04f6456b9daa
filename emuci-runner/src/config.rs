//! Runner configuration
//!
//! Settings for a single invocation of the step runner, assembled from the
//! command line and the environment.

use std::path::PathBuf;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the job specification file
    pub job_spec_file: PathBuf,

    /// Step group to execute; `None` only when listing groups
    pub job_step: Option<String>,

    /// Shell used to interpret each command
    pub shell: String,

    /// Print the commands instead of executing them
    pub dry_run: bool,

    /// Print the available step groups and exit
    pub list: bool,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(job_spec_file: PathBuf, job_step: Option<String>) -> Self {
        Self {
            job_spec_file,
            job_step,
            shell: "sh".to_string(),
            dry_run: false,
            list: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.job_spec_file.as_os_str().is_empty() {
            anyhow::bail!("job_spec_file cannot be empty");
        }

        if self.shell.trim().is_empty() {
            anyhow::bail!("shell cannot be empty");
        }

        match &self.job_step {
            None if !self.list => anyhow::bail!("a job step is required unless --list is given"),
            Some(step) if step.trim().is_empty() => anyhow::bail!("job step cannot be empty"),
            _ => Ok(()),
        }
    }
}
