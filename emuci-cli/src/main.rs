//! emuci CLI
//!
//! Command-line interface for the emulator's CI: triggers jobs on the build
//! server, looks up upstream builds and turns emulator result artifacts into a
//! JUnit report.

mod commands;
mod config;
mod trigger;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use emuci_core::domain::log::LogLevel;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "emuci")]
#[command(about = "emuci CI coordination CLI", long_about = None)]
struct Cli {
    /// Set the logging output level (CRITICAL, ERROR, WARNING, INFO, DEBUG)
    #[arg(long, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Build server URL
    #[arg(
        long,
        env = "EMUCI_SERVER_URL",
        default_value = "http://10.10.1.15:8066"
    )]
    server_url: String,

    /// Build server user name
    #[arg(long, env = "EMUCI_USER")]
    user: Option<String>,

    /// Build server API token
    #[arg(long, env = "EMUCI_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "EMUCI_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = Config::new(
        cli.server_url,
        cli.user,
        cli.api_token,
        Duration::from_secs(cli.timeout),
    );
    config.validate()?;

    handle_command(cli.command, &config).await
}

/// Logs go to stderr; stdout carries command output
fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.filter_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
