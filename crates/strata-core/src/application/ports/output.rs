//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `strata-adapters` crate provides implementations.

use std::path::Path;

use crate::application::pipeline::Stage;
use crate::domain::{FrameworkVersion, ProjectTemplate};
use crate::error::StrataResult;

/// Port for the external build/package tool (`dotnet` in production).
///
/// Implemented by:
/// - `strata_adapters::project_tool::DotnetCli` (production)
/// - `strata_adapters::project_tool::MemoryProjectTool` (testing)
///
/// ## Design Notes
///
/// - Every method takes the solution root explicitly; the tool holds no
///   per-run state of its own
/// - Project paths are solution-relative
/// - Calls are blocking with no timeout; a hang in the tool hangs the
///   pipeline (acceptable for a one-shot generator)
pub trait ProjectTool: Send + Sync {
    /// Whether the tool is installed and reachable. Checked once, before any
    /// mutation.
    fn is_available(&self) -> bool;

    /// Create the aggregate container (solution file) at the root.
    fn create_solution(&self, root: &Path, name: &str) -> StrataResult<()>;

    /// Create one project from a built-in template.
    fn create_project(
        &self,
        root: &Path,
        template: ProjectTemplate,
        framework: &FrameworkVersion,
        output_dir: &Path,
        name: &str,
    ) -> StrataResult<()>;

    /// Register a project into the solution file.
    fn add_to_solution(&self, root: &Path, project_file: &Path) -> StrataResult<()>;

    /// Add a project-to-project reference edge.
    fn add_reference(&self, root: &Path, from_project: &Path, to_project: &Path)
    -> StrataResult<()>;

    /// Install one package at a pinned version into a project.
    fn add_package(
        &self,
        root: &Path,
        project_file: &Path,
        package: &str,
        version: &str,
    ) -> StrataResult<()>;

    /// Run the verification build over the whole solution.
    fn build(&self, root: &Path) -> StrataResult<()>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write content to a file, creating parents as needed.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the one interactive decision the pipeline can ask for.
///
/// Implemented by:
/// - the CLI's stdin prompt (production)
/// - `strata_adapters::prompter::ScriptedPrompter` (testing)
pub trait Prompter: Send + Sync {
    /// Ask whether to continue into an already-existing target directory.
    /// `false` aborts the run before any mutation.
    fn confirm_overwrite(&self, path: &Path) -> StrataResult<bool>;
}

/// Port for per-stage status narration.
///
/// Implemented by:
/// - the CLI's `OutputManager` (production)
/// - `strata_adapters::reporter::RecordingReporter` (testing)
pub trait StatusReporter: Send + Sync {
    fn stage_started(&self, stage: Stage);

    fn stage_completed(&self, stage: Stage);

    /// A non-fatal finding. Warnings never stop the pipeline.
    fn warning(&self, message: &str);
}
