//! Filesystem/tool orchestrator.
//!
//! Executes the ordered structural operations (create solution, create
//! component, register, add reference, add package, write file) against the
//! environment through the driven ports, and enforces the idempotence policy:
//! pre-existing state is warned about and skipped, never deleted.
//!
//! Every applied operation is recorded in an [`OperationLog`]. There is no
//! rollback; on failure the log tells the user exactly what was left behind.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::{Filesystem, ProjectTool, StatusReporter};
use crate::domain::{Component, PackageRequirement, ScaffoldConfig};
use crate::error::StrataResult;

/// How a file write treats an already-present target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Skip the write if the file exists.
    CreateIfAbsent,
    /// Write anyway, emitting a warning first. Selected for pre-existing
    /// files when the user confirmed continuing into an existing target.
    OverwriteWithWarning,
}

/// One pending starter-file write.
///
/// Ordering invariant: a `FileOperation` targeting a path inside component C
/// is only applied after C's creation operation has completed; the pipeline
/// stage order guarantees this.
#[derive(Debug, Clone)]
pub struct FileOperation {
    pub target_path: PathBuf,
    pub content: String,
    pub mode: WriteMode,
}

/// One structural operation that was actually applied (or deliberately
/// skipped) during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedOperation {
    SolutionCreated { name: String },
    SolutionReused { name: String },
    ComponentCreated { id: String },
    ComponentReused { id: String },
    ComponentRegistered { id: String },
    ReferenceAdded { from: String, to: String },
    PackageInstalled { component: String, package: String },
    FileWritten { path: PathBuf, overwrote: bool },
    FileSkipped { path: PathBuf },
}

/// Append-only record of what a run did, in order.
///
/// Exposed for diagnostics; on a fail-fast halt it describes the partial
/// state left on disk.
#[derive(Debug, Default, Clone)]
pub struct OperationLog {
    entries: Vec<AppliedOperation>,
}

impl OperationLog {
    fn record(&mut self, op: AppliedOperation) {
        debug!(?op, "operation applied");
        self.entries.push(op);
    }

    pub fn entries(&self) -> &[AppliedOperation] {
        &self.entries
    }

    pub fn components_created(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::ComponentCreated { .. }))
    }

    pub fn components_reused(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::ComponentReused { .. }))
    }

    pub fn packages_installed(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::PackageInstalled { .. }))
    }

    pub fn files_written(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::FileWritten { .. }))
    }

    pub fn files_skipped(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::FileSkipped { .. }))
    }

    fn count(&self, pred: impl Fn(&AppliedOperation) -> bool) -> usize {
        self.entries.iter().filter(|op| pred(op)).count()
    }
}

/// Sequences external calls for one run, against one solution root.
///
/// Borrowed ports, owned log. Constructed fresh by the pipeline driver for
/// each invocation.
pub struct Orchestrator<'a> {
    tool: &'a dyn ProjectTool,
    filesystem: &'a dyn Filesystem,
    root: &'a Path,
    log: OperationLog,
}

impl<'a> Orchestrator<'a> {
    pub fn new(tool: &'a dyn ProjectTool, filesystem: &'a dyn Filesystem, root: &'a Path) -> Self {
        Self {
            tool,
            filesystem,
            root,
            log: OperationLog::default(),
        }
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn into_log(self) -> OperationLog {
        self.log
    }

    /// Create the solution root directory and the aggregate container file,
    /// skipping the container when it already exists.
    pub fn ensure_solution(&mut self, config: &ScaffoldConfig) -> StrataResult<()> {
        self.filesystem.create_dir_all(self.root)?;

        let solution_file = self.root.join(format!("{}.sln", config.name()));
        if self.filesystem.exists(&solution_file) {
            self.log.record(AppliedOperation::SolutionReused {
                name: config.name().to_string(),
            });
            return Ok(());
        }

        self.tool.create_solution(self.root, config.name())?;
        self.log.record(AppliedOperation::SolutionCreated {
            name: config.name().to_string(),
        });
        Ok(())
    }

    /// Create one component project, warning and skipping the create when its
    /// directory already exists. Sub-directories are ensured either way, so a
    /// reused component still gains e.g. the CQRS sub-paths.
    pub fn ensure_component(
        &mut self,
        component: &Component,
        config: &ScaffoldConfig,
        reporter: &dyn StatusReporter,
    ) -> StrataResult<()> {
        let component_dir = self.root.join(&component.path);

        if self.filesystem.exists(&component_dir) {
            warn!(component = %component.id, "component directory already present, skipping create");
            reporter.warning(&format!(
                "{} already exists, keeping it as-is",
                component.id
            ));
            self.log.record(AppliedOperation::ComponentReused {
                id: component.id.to_string(),
            });
        } else {
            self.tool.create_project(
                self.root,
                component.template,
                config.framework(),
                &component.path,
                component.id.as_str(),
            )?;
            self.log.record(AppliedOperation::ComponentCreated {
                id: component.id.to_string(),
            });
        }

        for sub_dir in &component.sub_dirs {
            self.filesystem.create_dir_all(&component_dir.join(sub_dir))?;
        }
        Ok(())
    }

    /// Register a component into the solution file. Applied to reused
    /// components too; the tool treats re-registration as a no-op.
    pub fn register_component(&mut self, component: &Component) -> StrataResult<()> {
        self.tool
            .add_to_solution(self.root, &component.project_file())?;
        self.log.record(AppliedOperation::ComponentRegistered {
            id: component.id.to_string(),
        });
        Ok(())
    }

    /// Add every allowed-dependency edge of a component.
    pub fn wire_references(
        &mut self,
        component: &Component,
        resolve_project: impl Fn(&crate::domain::ComponentId) -> Option<PathBuf>,
    ) -> StrataResult<()> {
        let from = component.project_file();
        for dep in &component.depends_on {
            let Some(to) = resolve_project(dep) else {
                continue;
            };
            self.tool.add_reference(self.root, &from, &to)?;
            self.log.record(AppliedOperation::ReferenceAdded {
                from: component.id.to_string(),
                to: dep.to_string(),
            });
        }
        Ok(())
    }

    /// Install one resolved package requirement.
    pub fn install_package(
        &mut self,
        requirement: &PackageRequirement,
        project_file: &Path,
    ) -> StrataResult<()> {
        self.tool.add_package(
            self.root,
            project_file,
            requirement.package,
            &requirement.version,
        )?;
        self.log.record(AppliedOperation::PackageInstalled {
            component: requirement.component.to_string(),
            package: requirement.package.to_string(),
        });
        Ok(())
    }

    /// Apply one starter-file write under the solution root, honoring its
    /// [`WriteMode`].
    pub fn apply_file(
        &mut self,
        op: &FileOperation,
        reporter: &dyn StatusReporter,
    ) -> StrataResult<()> {
        let target = self.root.join(&op.target_path);
        let already_present = self.filesystem.exists(&target);

        match op.mode {
            WriteMode::CreateIfAbsent if already_present => {
                self.log.record(AppliedOperation::FileSkipped {
                    path: op.target_path.clone(),
                });
                return Ok(());
            }
            WriteMode::OverwriteWithWarning if already_present => {
                reporter.warning(&format!("overwriting {}", op.target_path.display()));
            }
            _ => {}
        }

        self.filesystem.write_file(&target, &op.content)?;
        self.log.record(AppliedOperation::FileWritten {
            path: op.target_path.clone(),
            overwrote: already_present,
        });
        Ok(())
    }
}
