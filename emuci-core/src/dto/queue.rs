//! Queue DTOs

use serde::{Deserialize, Serialize};

/// A submitted job waiting in the build server's queue
///
/// The `executable` descriptor appears once the queued job has started
/// running on an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub executable: Option<Executable>,
    /// Server-provided reason the item is still waiting
    #[serde(default)]
    pub why: Option<String>,
}

impl QueueItem {
    pub fn is_resolved(&self) -> bool {
        self.executable.is_some()
    }
}

/// Running build a queue item resolved into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    pub number: i64,
    pub url: String,
}
