//! Parent lookup command handler

use anyhow::{Context, Result};
use clap::Args;
use emuci_client::BuildServer;
use tracing::debug;

use crate::config::Config;

#[derive(Args)]
pub struct ParentArgs {
    /// Job name (folder jobs as `folder/job`)
    job: String,

    /// Build number
    build_id: i64,
}

/// Prints the upstream build as JSON, `{"build_name": "None", "build_id": -1}`
/// when the build was not triggered by another job
pub async fn handle_parent_command(args: ParentArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let parent = client
        .parent_job_info(&args.job, args.build_id)
        .await
        .with_context(|| format!("Failed to read build {} #{}", args.job, args.build_id))?;

    debug!("Parent of {} #{}: {}", args.job, args.build_id, parent);
    println!("{}", serde_json::to_string_pretty(&parent)?);
    Ok(())
}
