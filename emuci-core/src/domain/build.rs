//! Build linkage domain types

use serde::{Deserialize, Serialize};

use crate::dto::build::BuildInfo;

/// Upstream build that triggered a build, if any
///
/// Derived on demand from the build's metadata. Builds that were not triggered
/// by another job report the sentinel pair `("None", -1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentJobInfo {
    pub build_name: String,
    pub build_id: i64,
}

impl ParentJobInfo {
    pub const NO_PARENT_NAME: &'static str = "None";
    pub const NO_PARENT_ID: i64 = -1;

    /// The "no upstream build" sentinel
    pub fn none() -> Self {
        Self {
            build_name: Self::NO_PARENT_NAME.to_string(),
            build_id: Self::NO_PARENT_ID,
        }
    }

    pub fn is_none(&self) -> bool {
        self.build_id == Self::NO_PARENT_ID && self.build_name == Self::NO_PARENT_NAME
    }

    /// Reads the upstream cause from the first action of a build
    ///
    /// A missing `causes` field, an empty action list or a first cause without
    /// upstream fields (e.g. a build started by a user) all mean "no parent".
    pub fn from_build(build: &BuildInfo) -> Self {
        build
            .actions
            .first()
            .and_then(|action| action.causes.as_ref())
            .and_then(|causes| causes.first())
            .and_then(|cause| {
                Some(Self {
                    build_name: cause.upstream_project.clone()?,
                    build_id: cause.upstream_build?,
                })
            })
            .unwrap_or_else(Self::none)
    }
}

impl std::fmt::Display for ParentJobInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.build_name, self.build_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> BuildInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_upstream_cause() {
        let info = ParentJobInfo::from_build(&build(
            r#"{"actions": [{"_class": "hudson.model.CauseAction",
                "causes": [{"upstreamProject": "riscvemu-nightly", "upstreamBuild": 412}]}]}"#,
        ));

        assert_eq!(info.build_name, "riscvemu-nightly");
        assert_eq!(info.build_id, 412);
        assert!(!info.is_none());
    }

    #[test]
    fn test_missing_causes_is_no_parent() {
        let json = r#"{"actions": [
            {"parameters": []},
            {"causes": [{"upstreamProject": "x", "upstreamBuild": 1}]}
        ]}"#;

        let info = ParentJobInfo::from_build(&build(json));

        assert_eq!(info, ParentJobInfo::none());
        assert_eq!(info.build_name, "None");
        assert_eq!(info.build_id, -1);
    }

    #[test]
    fn test_user_cause_is_no_parent() {
        let info = ParentJobInfo::from_build(&build(
            r#"{"actions": [{"causes": [{"shortDescription": "Started by user admin"}]}]}"#,
        ));
        assert!(info.is_none());
    }

    #[test]
    fn test_empty_actions_is_no_parent() {
        assert!(ParentJobInfo::from_build(&build(r#"{"actions": []}"#)).is_none());
        assert!(ParentJobInfo::from_build(&build("{}")).is_none());
    }

    #[test]
    fn test_serializes_with_field_names() {
        let json = serde_json::to_value(ParentJobInfo::none()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"build_name": "None", "build_id": -1})
        );
    }
}
