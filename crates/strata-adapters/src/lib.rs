//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations: the real
//! `dotnet` invocations, the local filesystem, and the in-memory fakes the
//! pipeline tests run against.

pub mod filesystem;
pub mod project_tool;
pub mod prompter;
pub mod reporter;
pub mod starter_files;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_tool::{DotnetCli, MemoryProjectTool};
pub use prompter::{AutoConfirm, ScriptedPrompter};
pub use reporter::{NullReporter, RecordingReporter};
