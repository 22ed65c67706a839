//! Production adapter: blocking shell-outs to the `dotnet` CLI.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use strata_core::application::ApplicationError;
use strata_core::application::ports::ProjectTool;
use strata_core::domain::{FrameworkVersion, ProjectTemplate};
use strata_core::error::StrataResult;

/// Drives the real `dotnet` executable.
///
/// Every call blocks until the tool exits; there is no timeout. Output is
/// captured, not streamed: on failure the tail of stderr goes into the error.
#[derive(Debug, Clone)]
pub struct DotnetCli {
    program: String,
}

impl DotnetCli {
    pub fn new() -> Self {
        Self {
            program: "dotnet".into(),
        }
    }

    /// Use a different executable name (testing against a stub).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn exec(&self, root: &Path, args: Vec<OsString>) -> StrataResult<()> {
        let operation = format!(
            "{} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        );
        debug!(%operation, root = %root.display(), "invoking project tool");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(root)
            .output()
            .map_err(|e| ApplicationError::StructuralOperationFailure {
                operation: operation.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::StructuralOperationFailure {
                operation,
                detail: stderr_tail(&output.stderr),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Last few stderr lines; enough to identify the failure without dumping a
/// full MSBuild log into one error message.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail_start = lines.len().saturating_sub(5);
    lines[tail_start..].join("\n")
}

impl ProjectTool for DotnetCli {
    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn create_solution(&self, root: &Path, name: &str) -> StrataResult<()> {
        self.exec(root, vec!["new".into(), "sln".into(), "--name".into(), name.into()])
    }

    fn create_project(
        &self,
        root: &Path,
        template: ProjectTemplate,
        framework: &FrameworkVersion,
        output_dir: &Path,
        name: &str,
    ) -> StrataResult<()> {
        self.exec(
            root,
            vec![
                "new".into(),
                template.as_str().into(),
                "--framework".into(),
                framework.moniker().into(),
                "--output".into(),
                output_dir.into(),
                "--name".into(),
                name.into(),
            ],
        )
    }

    fn add_to_solution(&self, root: &Path, project_file: &Path) -> StrataResult<()> {
        self.exec(root, vec!["sln".into(), "add".into(), project_file.into()])
    }

    fn add_reference(
        &self,
        root: &Path,
        from_project: &Path,
        to_project: &Path,
    ) -> StrataResult<()> {
        self.exec(
            root,
            vec![
                "add".into(),
                from_project.into(),
                "reference".into(),
                to_project.into(),
            ],
        )
    }

    fn add_package(
        &self,
        root: &Path,
        project_file: &Path,
        package: &str,
        version: &str,
    ) -> StrataResult<()> {
        self.exec(
            root,
            vec![
                "add".into(),
                project_file.into(),
                "package".into(),
                package.into(),
                "--version".into(),
                version.into(),
            ],
        )
    }

    fn build(&self, root: &Path) -> StrataResult<()> {
        self.exec(root, vec!["build".into()])
    }
}
