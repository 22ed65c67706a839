//! In-memory project tool for testing the pipeline without `dotnet`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use strata_core::application::ApplicationError;
use strata_core::application::ports::{Filesystem, ProjectTool};
use strata_core::domain::{FrameworkVersion, ProjectTemplate};
use strata_core::error::StrataResult;

use crate::filesystem::MemoryFilesystem;

/// One recorded tool invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    CreateSolution {
        name: String,
    },
    CreateProject {
        name: String,
        template: &'static str,
        framework: String,
        output_dir: PathBuf,
    },
    AddToSolution {
        project_file: PathBuf,
    },
    AddReference {
        from: PathBuf,
        to: PathBuf,
    },
    AddPackage {
        project_file: PathBuf,
        package: String,
        version: String,
    },
    Build,
}

#[derive(Debug, Default)]
struct MemoryProjectToolInner {
    calls: Vec<ToolCall>,
}

/// Fake project tool.
///
/// Mirrors created solutions and project directories into the shared
/// [`MemoryFilesystem`], so the orchestrator's existence checks see the same
/// world the tool produced. Failure knobs let tests exercise the fail-fast
/// and best-effort paths.
#[derive(Debug, Clone)]
pub struct MemoryProjectTool {
    inner: Arc<RwLock<MemoryProjectToolInner>>,
    mirror: MemoryFilesystem,
    available: bool,
    build_succeeds: bool,
    fail_create_for: Option<String>,
}

impl MemoryProjectTool {
    /// Create a tool sharing state with `mirror`.
    pub fn new(mirror: MemoryFilesystem) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryProjectToolInner::default())),
            mirror,
            available: true,
            build_succeeds: true,
            fail_create_for: None,
        }
    }

    /// Simulate the tool not being installed.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Make the verification build fail.
    pub fn failing_build(mut self) -> Self {
        self.build_succeeds = false;
        self
    }

    /// Fail the create call for one named project.
    pub fn failing_create_for(mut self, name: impl Into<String>) -> Self {
        self.fail_create_for = Some(name.into());
        self
    }

    /// All recorded calls, in order (testing helper).
    pub fn calls(&self) -> Vec<ToolCall> {
        self.inner.read().unwrap().calls.clone()
    }

    /// Names of projects the tool was asked to create.
    pub fn created_projects(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::CreateProject { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Installed (project, package, version) triples.
    pub fn installed_packages(&self) -> Vec<(PathBuf, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::AddPackage {
                    project_file,
                    package,
                    version,
                } => Some((project_file, package, version)),
                _ => None,
            })
            .collect()
    }

    /// Reference edges added, as (from, to) project-file pairs.
    pub fn references(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::AddReference { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    pub fn build_invocations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ToolCall::Build))
            .count()
    }

    fn record(&self, call: ToolCall) -> StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::AdapterLockError)?;
        inner.calls.push(call);
        Ok(())
    }
}

impl ProjectTool for MemoryProjectTool {
    fn is_available(&self) -> bool {
        self.available
    }

    fn create_solution(&self, root: &Path, name: &str) -> StrataResult<()> {
        self.record(ToolCall::CreateSolution { name: name.into() })?;
        self.mirror
            .write_file(&root.join(format!("{name}.sln")), "")?;
        Ok(())
    }

    fn create_project(
        &self,
        root: &Path,
        template: ProjectTemplate,
        framework: &FrameworkVersion,
        output_dir: &Path,
        name: &str,
    ) -> StrataResult<()> {
        if self.fail_create_for.as_deref() == Some(name) {
            return Err(ApplicationError::StructuralOperationFailure {
                operation: format!("create project {name}"),
                detail: "simulated tool failure".into(),
            }
            .into());
        }

        self.record(ToolCall::CreateProject {
            name: name.into(),
            template: template.as_str(),
            framework: framework.moniker().into(),
            output_dir: output_dir.to_path_buf(),
        })?;

        // Mirror what `dotnet new` leaves on disk: the project directory and
        // its project file.
        let project_dir = root.join(output_dir);
        self.mirror.create_dir_all(&project_dir)?;
        self.mirror
            .write_file(&project_dir.join(format!("{name}.csproj")), "<Project />")?;
        Ok(())
    }

    fn add_to_solution(&self, _root: &Path, project_file: &Path) -> StrataResult<()> {
        self.record(ToolCall::AddToSolution {
            project_file: project_file.to_path_buf(),
        })
    }

    fn add_reference(
        &self,
        _root: &Path,
        from_project: &Path,
        to_project: &Path,
    ) -> StrataResult<()> {
        self.record(ToolCall::AddReference {
            from: from_project.to_path_buf(),
            to: to_project.to_path_buf(),
        })
    }

    fn add_package(
        &self,
        _root: &Path,
        project_file: &Path,
        package: &str,
        version: &str,
    ) -> StrataResult<()> {
        self.record(ToolCall::AddPackage {
            project_file: project_file.to_path_buf(),
            package: package.into(),
            version: version.into(),
        })
    }

    fn build(&self, _root: &Path) -> StrataResult<()> {
        self.record(ToolCall::Build)?;
        if self.build_succeeds {
            Ok(())
        } else {
            Err(ApplicationError::StructuralOperationFailure {
                operation: "build".into(),
                detail: "simulated build failure".into(),
            }
            .into())
        }
    }
}
