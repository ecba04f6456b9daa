//! Trigger command handler

use anyhow::{Result, bail};
use clap::Args;
use colored::*;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::trigger::kind::DEFAULT_CHECKPOINT_GROUP;
use crate::trigger::{JobOutcome, JobRegistry, Trigger, TriggerOptions, git};

#[derive(Args)]
pub struct TriggerArgs {
    /// Branch to build (defaults to the current branch of the working tree)
    #[arg(long)]
    branch: Option<String>,

    /// Group of checkpoints to regress
    #[arg(long, default_value = DEFAULT_CHECKPOINT_GROUP)]
    checkpoint_group: String,

    /// Manifest of previously failing checkpoint jobs to rerun
    #[arg(long)]
    failed_chpt_job_manifest: Option<String>,

    /// Jobs to trigger, in order
    #[arg(required = true)]
    jobs: Vec<String>,
}

pub async fn handle_trigger_command(args: TriggerArgs, config: &Config) -> Result<()> {
    let registry = JobRegistry::builtin();
    registry.ensure_known(&args.jobs)?;

    let branch = match args.branch {
        Some(branch) => branch,
        None => git::current_branch(Path::new(".")).await?,
    };
    info!("Triggering {} job(s) on branch {}", args.jobs.len(), branch);

    let options = TriggerOptions {
        checkpoint_group: args.checkpoint_group,
        failed_chpt_job_manifest: args.failed_chpt_job_manifest,
    };

    let client = config.client()?;
    let outcomes = Trigger::new(&client, &registry)
        .run_batch(&args.jobs, &branch, &options)
        .await;

    for outcome in &outcomes {
        print_outcome(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.started()).count();
    if failed > 0 {
        bail!("{} of {} job(s) failed to start", failed, outcomes.len());
    }
    Ok(())
}

fn print_outcome(outcome: &JobOutcome) {
    match outcome {
        JobOutcome::Started { job, executable } => {
            println!("{} {}", "Started job".green().bold(), job.bold());
            println!("\t URL: {}", executable.url);
        }
        JobOutcome::NotStarted {
            job,
            queue_id,
            attempts,
        } => {
            println!(
                "{} {} (queue item {} unresolved after {} polls)",
                "Not started".red().bold(),
                job.bold(),
                queue_id,
                attempts
            );
        }
        JobOutcome::Failed { job, error } => {
            println!("{} {}: {}", "Failed".red().bold(), job.bold(), error);
        }
    }
}
