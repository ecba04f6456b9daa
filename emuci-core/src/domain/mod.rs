//! Core domain types
//!
//! These types represent the entities the CI tools work with and are shared
//! between the step runner, the report aggregator and the CLI.

pub mod build;
pub mod log;
pub mod report;
pub mod spec;
pub mod step;
