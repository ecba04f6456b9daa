//! Report command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use emuci_core::domain::report::TestReport;
use emuci_report::{Aggregator, SuccessMarkers, write_junit};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ReportArgs {
    /// Directory holding the result artifacts
    #[arg(long)]
    output_dir: PathBuf,

    /// JUnit XML file to write
    #[arg(long)]
    output_xml: PathBuf,

    /// Regex marking a successful run, replacing the built-in marker
    #[arg(long)]
    success_marker: Option<String>,

    /// Artifact extension to collect (e.g. riscvemu)
    extension: String,
}

pub fn handle_report_command(args: ReportArgs) -> Result<()> {
    let mut markers = SuccessMarkers::builtin();
    if let Some(pattern) = &args.success_marker {
        markers.register(args.extension.as_str(), pattern)?;
    }

    let report = Aggregator::new(markers)
        .aggregate(&args.output_dir, &args.extension)
        .with_context(|| format!("Failed to aggregate {}", args.output_dir.display()))?;

    write_junit(&report, &args.output_xml)?;
    info!("Wrote {}", args.output_xml.display());

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &TestReport) {
    if report.is_empty() {
        println!("{}", "No artifacts found.".yellow());
        return;
    }

    for suite in &report.suites {
        let failures = suite.failures();
        let status = if failures == 0 {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!(
            "{} {} ({}/{} passed)",
            status,
            suite.name,
            suite.cases.len() - failures,
            suite.cases.len()
        );
        for case in suite.cases.iter().filter(|c| !c.passed()) {
            println!("\t{} {}", case.name.red(), case.file.dimmed());
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "{} case(s), {} failure(s)",
            report.total_cases(),
            report.total_failures()
        )
        .bold()
    );
}
