//! Success markers
//!
//! An artifact passes when any of its lines matches the success marker
//! registered for its extension.

use regex::Regex;
use std::collections::HashMap;

use crate::error::{ReportError, Result};

/// Success marker of the emulator's own console logs
pub const RISCVEMU_MARKER: &str = "Power off";

/// Per-extension success marker table
#[derive(Debug, Clone, Default)]
pub struct SuccessMarkers {
    by_extension: HashMap<String, Regex>,
}

impl SuccessMarkers {
    /// Markers for the artifact types the test campaigns produce
    pub fn builtin() -> Self {
        let riscvemu = Regex::new(RISCVEMU_MARKER).expect("builtin marker is valid");
        Self {
            by_extension: HashMap::from([("riscvemu".to_string(), riscvemu)]),
        }
    }

    /// Registers (or replaces) the marker for an extension
    pub fn register(&mut self, extension: impl Into<String>, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| ReportError::InvalidMarker {
            pattern: pattern.to_string(),
            source,
        })?;
        self.by_extension.insert(extension.into(), regex);
        Ok(())
    }

    pub fn for_extension(&self, extension: &str) -> Option<&Regex> {
        self.by_extension.get(extension)
    }
}

/// Returns true when any line of `content` matches `marker`
pub fn contains_marker(marker: &Regex, content: &str) -> bool {
    content.lines().any(|line| marker.is_match(line))
}
