//! emuci Runner
//!
//! Executes one named step group of a CI job specification.
//!
//! The job specification is a JSON object mapping step-group names (e.g.
//! `GIT_STEPS`, `BUILD_STEPS`, `TEST_STEPS`) to lists of shell commands. The
//! commands of the requested group run sequentially through the shell with
//! their output streamed straight to the terminal; the first failing command
//! aborts the group and its exit status becomes the runner's.

mod config;
mod execution;
mod service;

use anyhow::Context;
use clap::Parser;
use emuci_core::domain::log::LogLevel;
use emuci_core::domain::spec::JobSpec;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::execution::StepError;
use crate::service::{ExecutionService, ShellCommandRunner, StandardExecutionService};

#[derive(Parser)]
#[command(name = "emuci-runner")]
#[command(about = "Run one step group of a job specification", long_about = None)]
struct Cli {
    /// Set the logging output level (CRITICAL, ERROR, WARNING, INFO, DEBUG)
    #[arg(long, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Shell used to interpret each command
    #[arg(long, env = "EMUCI_SHELL", default_value = "sh")]
    shell: String,

    /// Print the commands of the step group without executing them
    #[arg(long)]
    dry_run: bool,

    /// List the step groups defined in the job specification
    #[arg(long)]
    list: bool,

    /// Path to the job specification JSON file: an object of step-group
    /// names to lists of commands
    job_spec_file: PathBuf,

    /// Step group to execute (e.g. BUILD_STEPS)
    job_step: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = Config {
        shell: cli.shell,
        dry_run: cli.dry_run,
        list: cli.list,
        ..Config::new(cli.job_spec_file, cli.job_step)
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:#}", e);
        return ExitCode::from(2);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let Some(step_error) = e.downcast_ref::<StepError>() else {
                return ExitCode::from(2);
            };
            if let Some(report) = step_error.report() {
                error!(
                    "{}: {} of {} attempted step(s) completed before the failure",
                    report.group,
                    report.completed(),
                    report.steps.len()
                );
            }
            ExitCode::from(step_error.exit_code())
        }
    }
}

/// Initializes logging on stderr so it does not mix with step output on stdout
///
/// `RUST_LOG` takes precedence over `--log-level` when set.
fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.filter_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let spec = JobSpec::load(&config.job_spec_file).map_err(StepError::from)?;
    info!(
        "Loaded job specification {}",
        config.job_spec_file.display()
    );

    if config.list {
        for group in spec.group_names() {
            println!("{}", group);
        }
        return Ok(());
    }

    let group = config.job_step.as_deref().context("no job step given")?;

    if config.dry_run {
        let commands = spec.group(group).map_err(StepError::from)?;
        for command in commands {
            println!("{}", command);
        }
        return Ok(());
    }

    let service = StandardExecutionService::new(ShellCommandRunner::new(&config.shell));
    let report = service.execute_group(&spec, group)?;

    info!(
        "{}: {} step(s) succeeded",
        report.group,
        report.completed()
    );

    Ok(())
}
