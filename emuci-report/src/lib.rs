//! emuci Report
//!
//! Aggregates the per-test artifacts of an emulator test campaign into a
//! JUnit XML report.
//!
//! Each artifact is named `<suite>-<suffix>-<test_name>.<extension>` and is
//! judged by searching it line by line for the success marker registered for
//! its extension.
//!
//! # Example
//!
//! ```no_run
//! use emuci_report::{Aggregator, write_junit};
//! use std::path::Path;
//!
//! let report = Aggregator::default().aggregate(Path::new("output"), "riscvemu")?;
//! write_junit(&report, Path::new("report.xml"))?;
//! # Ok::<(), emuci_report::ReportError>(())
//! ```

pub mod aggregate;
pub mod artifact;
pub mod error;
pub mod junit;
pub mod marker;

pub use aggregate::Aggregator;
pub use artifact::ArtifactName;
pub use error::{ReportError, Result};
pub use junit::{to_junit_xml, write_junit};
pub use marker::SuccessMarkers;
