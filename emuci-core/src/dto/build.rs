//! Build metadata DTOs

use serde::{Deserialize, Serialize};

/// Build metadata as returned by `/job/<name>/<id>/api/json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub actions: Vec<BuildAction>,
}

/// One entry of a build's action list
///
/// Actions are heterogeneous; only cause actions carry `causes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildAction {
    #[serde(default)]
    pub causes: Option<Vec<BuildCause>>,
}

/// Reason a build was started
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCause {
    #[serde(default)]
    pub upstream_project: Option<String>,
    #[serde(default)]
    pub upstream_build: Option<i64>,
    #[serde(default)]
    pub short_description: Option<String>,
}
