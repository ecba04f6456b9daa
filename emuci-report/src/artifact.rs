//! Result artifact names
//!
//! The emulator test campaign writes one artifact per test case named
//! `<suite>-<suffix>-<test_name>.<extension>`. The suite and suffix together
//! form the suite key used to group cases into suites.

use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// A parsed result artifact
///
/// Ordering is by `(suite_key, test_name)`, which is the order cases appear
/// in the report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArtifactName {
    pub suite_key: String,
    pub test_name: String,
    pub path: PathBuf,
}

impl ArtifactName {
    /// Parses an artifact path
    ///
    /// The file stem must have exactly three hyphen-separated components;
    /// anything else is rejected rather than skipped.
    pub fn parse(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let components: Vec<&str> = stem.split('-').collect();
        let [suite, suffix, test_name] = components.as_slice() else {
            return Err(ReportError::MalformedArtifactName {
                found: components.len(),
                path,
            });
        };

        Ok(Self {
            suite_key: format!("{}-{}", suite, suffix),
            test_name: test_name.to_string(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_artifact_name() {
        let artifact = ArtifactName::parse("/out/linux-boot-smp4.riscvemu").unwrap();

        assert_eq!(artifact.suite_key, "linux-boot");
        assert_eq!(artifact.test_name, "smp4");
        assert_eq!(artifact.path(), Path::new("/out/linux-boot-smp4.riscvemu"));
    }

    #[test]
    fn test_wrong_component_count_is_rejected() {
        for name in ["linux-smp4.riscvemu", "linux-boot-smp-4.riscvemu", "boot.riscvemu"] {
            let err = ArtifactName::parse(name).unwrap_err();
            assert!(
                matches!(err, ReportError::MalformedArtifactName { .. }),
                "{name} should be rejected"
            );
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn test_component_count_in_error() {
        match ArtifactName::parse("a-b-c-d.log").unwrap_err() {
            ReportError::MalformedArtifactName { found, .. } => assert_eq!(found, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ordering_by_suite_then_test() {
        let mut artifacts = vec![
            ArtifactName::parse("b-x-t1.ext").unwrap(),
            ArtifactName::parse("a-x-t2.ext").unwrap(),
            ArtifactName::parse("a-x-t1.ext").unwrap(),
        ];
        artifacts.sort();

        let order: Vec<_> = artifacts
            .iter()
            .map(|a| format!("{}/{}", a.suite_key, a.test_name))
            .collect();
        assert_eq!(order, ["a-x/t1", "a-x/t2", "b-x/t1"]);
    }
}
