//! Artifact aggregation
//!
//! Scans an output directory (non-recursively) for `*.<extension>` artifacts,
//! evaluates each against the success marker and groups the resulting test
//! cases into suites by suite key.

use emuci_core::domain::report::{CaseOutcome, TestCase, TestReport, TestSuite};
use glob::{MatchOptions, Pattern};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::artifact::ArtifactName;
use crate::error::{ReportError, Result};
use crate::marker::{SuccessMarkers, contains_marker};

/// Builds test reports from result artifacts
pub struct Aggregator {
    markers: SuccessMarkers,
}

impl Aggregator {
    pub fn new(markers: SuccessMarkers) -> Self {
        Self { markers }
    }

    /// Aggregates every `*.<extension>` artifact of `output_dir`
    ///
    /// Fails on the first artifact whose name cannot be parsed. An empty
    /// directory yields an empty report.
    pub fn aggregate(&self, output_dir: &Path, extension: &str) -> Result<TestReport> {
        let mut artifacts = find_artifacts(output_dir, extension)?
            .into_iter()
            .map(ArtifactName::parse)
            .collect::<Result<Vec<_>>>()?;
        artifacts.sort();

        info!(
            "Found {} *.{} artifact(s) in {}",
            artifacts.len(),
            extension,
            output_dir.display()
        );

        let marker = self.markers.for_extension(extension);
        if marker.is_none() && !artifacts.is_empty() {
            warn!(
                "No success marker configured for *.{} artifacts; every case will fail",
                extension
            );
        }

        let mut suites = Vec::new();
        let mut current: Option<(String, Vec<TestCase>)> = None;

        for artifact in artifacts {
            let case = evaluate(&artifact, marker)?;

            let same_suite = current
                .as_ref()
                .is_some_and(|(key, _)| *key == artifact.suite_key);
            if !same_suite {
                if let Some((key, cases)) = current.take() {
                    suites.push(TestSuite::new(key, cases));
                }
                current = Some((artifact.suite_key.clone(), Vec::new()));
            }
            if let Some((_, cases)) = current.as_mut() {
                cases.push(case);
            }
        }

        if let Some((key, cases)) = current {
            suites.push(TestSuite::new(key, cases));
        }

        Ok(TestReport { suites })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(SuccessMarkers::builtin())
    }
}

/// Lists regular, non-hidden `*.<extension>` files directly inside `dir`
fn find_artifacts(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = std::path::absolute(dir).map_err(|source| ReportError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut paths = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn evaluate(artifact: &ArtifactName, marker: Option<&Regex>) -> Result<TestCase> {
    let bytes = std::fs::read(artifact.path()).map_err(|source| ReportError::Read {
        path: artifact.path.clone(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let file = artifact.path().display().to_string();

    let passed = marker.is_some_and(|marker| contains_marker(marker, &content));
    debug!(
        "{}/{}: {}",
        artifact.suite_key,
        artifact.test_name,
        if passed { "pass" } else { "fail" }
    );

    let outcome = if passed {
        CaseOutcome::Passed
    } else {
        CaseOutcome::Failed {
            message: format!("Error see log: {}", file),
        }
    };

    Ok(TestCase {
        name: artifact.test_name.clone(),
        classname: artifact.suite_key.clone(),
        file,
        outcome,
    })
}
