//! Application layer for Strata.
//!
//! This layer contains:
//! - **Pipeline**: the eight-stage scaffolding run (PipelineDriver)
//! - **Orchestrator**: idempotent execution of structural operations
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod ports;

// Re-export the driver and its run artifacts
pub use pipeline::{PipelineDriver, PipelineReport, Stage, VerificationOutcome};

pub use orchestrator::{AppliedOperation, FileOperation, OperationLog, Orchestrator, WriteMode};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Prompter, ProjectTool, StatusReporter};

pub use error::ApplicationError;
