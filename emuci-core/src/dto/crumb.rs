//! CSRF crumb DTO

use serde::{Deserialize, Serialize};

/// CSRF token as returned by `/crumbIssuer/api/json`
///
/// Sent back as the `crumb_request_field` header on state-changing requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub crumb: String,
    pub crumb_request_field: String,
}
