//! Job specification domain type
//!
//! A job specification maps step-group names (e.g. `BUILD_STEPS`) to the
//! ordered shell commands that make up that phase of a CI job. The file is a
//! flat JSON object whose values are arrays of strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or querying a job specification
#[derive(Debug, Error)]
pub enum SpecError {
    /// The specification file could not be read
    #[error("Failed to read job specification {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// The specification is not a JSON object of string arrays
    #[error("Invalid job specification {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The requested step group does not exist in the specification
    #[error("Step group '{group}' not found (available: {available})")]
    StepGroupNotFound { group: String, available: String },
}

/// Job specification: step-group name to ordered shell commands
///
/// Loaded once and treated as immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobSpec {
    groups: BTreeMap<String, Vec<String>>,
}

impl JobSpec {
    /// Builds a specification from `(group, commands)` pairs
    pub fn from_groups<I, K, C>(groups: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|(name, commands)| {
                    (name.into(), commands.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Loads a specification from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            origin: origin.clone(),
            source,
        })?;
        Self::parse(&contents, origin)
    }

    /// Parses a specification from JSON text
    ///
    /// `origin` names the source in error messages (usually the file path).
    pub fn parse(json: &str, origin: impl Into<String>) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|source| SpecError::Parse {
            origin: origin.into(),
            source,
        })
    }

    /// Returns the commands of a step group, in file order
    pub fn group(&self, name: &str) -> Result<&[String], SpecError> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SpecError::StepGroupNotFound {
                group: name.to_string(),
                available: self.group_names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Names of all step groups, sorted
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISCVEMU_SPEC: &str = r#"{
        "GIT_STEPS": ["git submodule update --init"],
        "BUILD_STEPS": ["make clean", "make -j8", "make install"],
        "TEST_STEPS": []
    }"#;

    #[test]
    fn test_parse_preserves_command_order() {
        let spec = JobSpec::parse(RISCVEMU_SPEC, "riscvemu.json").unwrap();

        let build = spec.group("BUILD_STEPS").unwrap();
        assert_eq!(build, ["make clean", "make -j8", "make install"]);
        assert!(spec.group("TEST_STEPS").unwrap().is_empty());
    }

    #[test]
    fn test_missing_group_lists_available_groups() {
        let spec = JobSpec::parse(RISCVEMU_SPEC, "riscvemu.json").unwrap();

        let err = spec.group("DEPLOY_STEPS").unwrap_err();
        match &err {
            SpecError::StepGroupNotFound { group, available } => {
                assert_eq!(group, "DEPLOY_STEPS");
                assert_eq!(available, "BUILD_STEPS, GIT_STEPS, TEST_STEPS");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("DEPLOY_STEPS"));
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let err = JobSpec::parse(r#"{"BUILD_STEPS": {"cmd": "make"}}"#, "bad.json").unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = JobSpec::load("/nonexistent/emuci/spec.json").unwrap_err();
        assert!(matches!(err, SpecError::Read { .. }));
    }

    #[test]
    fn test_from_groups() {
        let spec = JobSpec::from_groups([("TEST_STEPS", ["true", "false"])]);
        assert!(spec.contains("TEST_STEPS"));
        assert!(!spec.is_empty());
        assert_eq!(spec.group_names().collect::<Vec<_>>(), ["TEST_STEPS"]);
    }
}
