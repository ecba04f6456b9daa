//! Service layer
//!
//! Services contain the runner's business logic: launching shell commands
//! and executing step groups of a job specification in order.
//!
//! Services are trait-based so step groups can be exercised against a
//! recording command runner in tests.

mod execution;
mod shell;

// Re-export traits
pub use execution::ExecutionService;

// Re-export implementations
pub use execution::StandardExecutionService;
pub use shell::ShellCommandRunner;
