//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod parent;
mod report;
mod trigger;

pub use parent::ParentArgs;
pub use report::ReportArgs;
pub use trigger::TriggerArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit jobs to the build server and wait for them to start
    Trigger(TriggerArgs),
    /// Show the upstream build that triggered a build
    Parent(ParentArgs),
    /// Build a JUnit report from emulator result artifacts
    Report(ReportArgs),
}

/// Routes the command to its handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Trigger(args) => trigger::handle_trigger_command(args, config).await,
        Commands::Parent(args) => parent::handle_parent_command(args, config).await,
        Commands::Report(args) => report::handle_report_command(args),
    }
}
