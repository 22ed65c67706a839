//! Pipeline driver: the eight ordered stages plus the verification build.
//!
//! Stage order is fixed and there is no stage re-entry. Any structural
//! failure halts the pipeline immediately with no rollback; the operation
//! log in the report (or the error path) records what was applied. The final
//! verification build is deliberately best-effort: a failing build is
//! downgraded to a warning and the run still reports success.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::application::orchestrator::{FileOperation, OperationLog, Orchestrator, WriteMode};
use crate::application::ports::{Filesystem, Prompter, ProjectTool, StatusReporter};
use crate::application::ApplicationError;
use crate::domain::{resolve_packages, ComponentGraph, ScaffoldConfig, StarterFile};
use crate::error::StrataResult;

/// The fixed stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PrerequisiteCheck,
    StructureCreation,
    ComponentCreation,
    TestComponentCreation,
    SolutionRegistration,
    ReferenceWiring,
    PackageInstallation,
    StarterFiles,
    /// Best-effort final gate; failure is a warning, not an error.
    VerificationBuild,
}

impl Stage {
    /// Human-readable stage label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrerequisiteCheck => "Checking prerequisites",
            Self::StructureCreation => "Creating solution structure",
            Self::ComponentCreation => "Creating components",
            Self::TestComponentCreation => "Creating test components",
            Self::SolutionRegistration => "Registering components",
            Self::ReferenceWiring => "Wiring references",
            Self::PackageInstallation => "Installing packages",
            Self::StarterFiles => "Writing starter files",
            Self::VerificationBuild => "Verifying build",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of the final verification build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Passed,
    /// The build failed, but the run is still a success.
    FailedNonFatal,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub solution_root: PathBuf,
    pub verification: VerificationOutcome,
    pub log: OperationLog,
}

impl PipelineReport {
    pub fn verification_passed(&self) -> bool {
        self.verification == VerificationOutcome::Passed
    }
}

/// Composes validator output, graph, matrix, renderer, and orchestrator into
/// one run.
///
/// Owns the driven ports; borrows nothing across runs. Strictly sequential:
/// every operation completes before the next begins.
pub struct PipelineDriver {
    tool: Box<dyn ProjectTool>,
    filesystem: Box<dyn Filesystem>,
    prompter: Box<dyn Prompter>,
    reporter: Box<dyn StatusReporter>,
    starter_files: Vec<StarterFile>,
}

impl PipelineDriver {
    pub fn new(
        tool: Box<dyn ProjectTool>,
        filesystem: Box<dyn Filesystem>,
        prompter: Box<dyn Prompter>,
        reporter: Box<dyn StatusReporter>,
        starter_files: Vec<StarterFile>,
    ) -> Self {
        Self {
            tool,
            filesystem,
            prompter,
            reporter,
            starter_files,
        }
    }

    /// Run the whole pipeline for one configuration.
    ///
    /// `output_root` is the directory the solution directory is created in;
    /// the solution root itself is `output_root/<name>`.
    #[instrument(skip_all, fields(name = %config.name(), output = %output_root.display()))]
    pub fn run(
        &self,
        config: &ScaffoldConfig,
        output_root: &Path,
    ) -> StrataResult<PipelineReport> {
        // ── stage 1: prerequisite check ──────────────────────────────────
        self.reporter.stage_started(Stage::PrerequisiteCheck);
        if !self.tool.is_available() {
            return Err(ApplicationError::PrerequisiteMissing { tool: "dotnet" }.into());
        }
        self.reporter.stage_completed(Stage::PrerequisiteCheck);

        // The single interactive decision point. Before any mutation.
        let solution_root = output_root.join(config.name());
        let overwrite_confirmed = if self.filesystem.exists(&solution_root) {
            if !self.prompter.confirm_overwrite(&solution_root)? {
                return Err(ApplicationError::OverwriteDeclined {
                    path: solution_root,
                }
                .into());
            }
            self.reporter.warning(&format!(
                "continuing into existing directory {}",
                solution_root.display()
            ));
            true
        } else {
            false
        };

        let graph = ComponentGraph::derive(config);
        let requirements = resolve_packages(&graph, config)?;
        let mut orchestrator =
            Orchestrator::new(self.tool.as_ref(), self.filesystem.as_ref(), &solution_root);

        // ── stage 2: structure creation ──────────────────────────────────
        self.reporter.stage_started(Stage::StructureCreation);
        orchestrator.ensure_solution(config)?;
        self.reporter.stage_completed(Stage::StructureCreation);

        // ── stage 3: component creation ──────────────────────────────────
        // All four primaries exist before any edge is added.
        self.reporter.stage_started(Stage::ComponentCreation);
        for component in graph.primaries() {
            orchestrator.ensure_component(component, config, self.reporter.as_ref())?;
        }
        self.reporter.stage_completed(Stage::ComponentCreation);

        // ── stage 4: test component creation ─────────────────────────────
        // Reported even when --include-tests is off, so the stage sequence
        // the user sees is always the same.
        self.reporter.stage_started(Stage::TestComponentCreation);
        for component in graph.tests() {
            orchestrator.ensure_component(component, config, self.reporter.as_ref())?;
        }
        self.reporter.stage_completed(Stage::TestComponentCreation);

        // ── stage 5: aggregate registration ──────────────────────────────
        self.reporter.stage_started(Stage::SolutionRegistration);
        for component in graph.components() {
            orchestrator.register_component(component)?;
        }
        self.reporter.stage_completed(Stage::SolutionRegistration);

        // ── stage 6: reference wiring ────────────────────────────────────
        self.reporter.stage_started(Stage::ReferenceWiring);
        for component in graph.components() {
            orchestrator
                .wire_references(component, |id| graph.get(id).map(|c| c.project_file()))?;
        }
        self.reporter.stage_completed(Stage::ReferenceWiring);

        // ── stage 7: package installation ────────────────────────────────
        self.reporter.stage_started(Stage::PackageInstallation);
        for requirement in &requirements {
            let Some(component) = graph.get(&requirement.component) else {
                continue;
            };
            orchestrator.install_package(requirement, &component.project_file())?;
        }
        self.reporter.stage_completed(Stage::PackageInstallation);

        // ── stage 8: starter-file materialization ────────────────────────
        self.reporter.stage_started(Stage::StarterFiles);
        for starter in &self.starter_files {
            let mode = if overwrite_confirmed || starter.replaces_existing() {
                WriteMode::OverwriteWithWarning
            } else {
                WriteMode::CreateIfAbsent
            };
            let op = FileOperation {
                target_path: starter.rendered_path(config),
                content: starter.rendered_content(config),
                mode,
            };
            orchestrator.apply_file(&op, self.reporter.as_ref())?;
        }
        self.reporter.stage_completed(Stage::StarterFiles);

        // ── verification build (best-effort) ─────────────────────────────
        self.reporter.stage_started(Stage::VerificationBuild);
        let verification = match self.tool.build(&solution_root) {
            Ok(()) => {
                self.reporter.stage_completed(Stage::VerificationBuild);
                VerificationOutcome::Passed
            }
            Err(e) => {
                warn!(error = %e, "verification build failed");
                self.reporter.warning(&format!(
                    "verification build failed ({e}); the solution was generated anyway"
                ));
                VerificationOutcome::FailedNonFatal
            }
        };

        info!(
            components = orchestrator.log().components_created(),
            packages = orchestrator.log().packages_installed(),
            files = orchestrator.log().files_written(),
            "scaffold completed"
        );

        Ok(PipelineReport {
            log: orchestrator.into_log(),
            solution_root,
            verification,
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrataError;
    use mockall::mock;
    use mockall::predicate::always;
    use std::path::PathBuf;

    use crate::domain::{FrameworkVersion, ProjectTemplate};

    mock! {
        Tool {}
        impl ProjectTool for Tool {
            fn is_available(&self) -> bool;
            fn create_solution(&self, root: &Path, name: &str) -> StrataResult<()>;
            fn create_project(
                &self,
                root: &Path,
                template: ProjectTemplate,
                framework: &FrameworkVersion,
                output_dir: &Path,
                name: &str,
            ) -> StrataResult<()>;
            fn add_to_solution(&self, root: &Path, project_file: &Path) -> StrataResult<()>;
            fn add_reference(
                &self,
                root: &Path,
                from_project: &Path,
                to_project: &Path,
            ) -> StrataResult<()>;
            fn add_package(
                &self,
                root: &Path,
                project_file: &Path,
                package: &str,
                version: &str,
            ) -> StrataResult<()>;
            fn build(&self, root: &Path) -> StrataResult<()>;
        }
    }

    mock! {
        Fs {}
        impl Filesystem for Fs {
            fn create_dir_all(&self, path: &Path) -> StrataResult<()>;
            fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;
            fn exists(&self, path: &Path) -> bool;
        }
    }

    mock! {
        Prompt {}
        impl Prompter for Prompt {
            fn confirm_overwrite(&self, path: &Path) -> StrataResult<bool>;
        }
    }

    mock! {
        Reporter {}
        impl StatusReporter for Reporter {
            fn stage_started(&self, stage: Stage);
            fn stage_completed(&self, stage: Stage);
            fn warning(&self, message: &str);
        }
    }

    fn config() -> ScaffoldConfig {
        ScaffoldConfig::builder().name("Shop").build().unwrap().0
    }

    fn quiet_reporter() -> MockReporter {
        let mut reporter = MockReporter::new();
        reporter.expect_stage_started().returning(|_| ());
        reporter.expect_stage_completed().returning(|_| ());
        reporter.expect_warning().returning(|_| ());
        reporter
    }

    fn permissive_tool() -> MockTool {
        let mut tool = MockTool::new();
        tool.expect_is_available().return_const(true);
        tool.expect_create_solution().returning(|_, _| Ok(()));
        tool.expect_create_project().returning(|_, _, _, _, _| Ok(()));
        tool.expect_add_to_solution().returning(|_, _| Ok(()));
        tool.expect_add_reference().returning(|_, _, _| Ok(()));
        tool.expect_add_package().returning(|_, _, _, _| Ok(()));
        tool
    }

    fn empty_fs() -> MockFs {
        let mut fs = MockFs::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn driver(tool: MockTool, fs: MockFs, prompter: MockPrompt) -> PipelineDriver {
        PipelineDriver::new(
            Box::new(tool),
            Box::new(fs),
            Box::new(prompter),
            Box::new(quiet_reporter()),
            Vec::new(),
        )
    }

    #[test]
    fn missing_tool_halts_before_any_mutation() {
        let mut tool = MockTool::new();
        tool.expect_is_available().return_const(false);
        tool.expect_create_solution().never();

        let mut fs = MockFs::new();
        fs.expect_exists().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let result = driver(tool, fs, MockPrompt::new()).run(&config(), Path::new("/tmp"));
        assert!(matches!(
            result,
            Err(StrataError::Application(
                ApplicationError::PrerequisiteMissing { tool: "dotnet" }
            ))
        ));
    }

    #[test]
    fn declined_overwrite_is_fatal_and_mutation_free() {
        let mut tool = MockTool::new();
        tool.expect_is_available().return_const(true);
        tool.expect_create_solution().never();

        let mut fs = MockFs::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut prompter = MockPrompt::new();
        prompter
            .expect_confirm_overwrite()
            .with(always())
            .returning(|_| Ok(false));

        let result = driver(tool, fs, prompter).run(&config(), Path::new("/tmp"));
        assert!(matches!(
            result,
            Err(StrataError::Application(
                ApplicationError::OverwriteDeclined { .. }
            ))
        ));
    }

    #[test]
    fn verification_failure_is_downgraded_to_warning() {
        let mut tool = permissive_tool();
        tool.expect_build().returning(|_| {
            Err(ApplicationError::StructuralOperationFailure {
                operation: "build".into(),
                detail: "CS0246".into(),
            }
            .into())
        });

        let report = driver(tool, empty_fs(), MockPrompt::new())
            .run(&config(), Path::new("/tmp"))
            .unwrap();
        assert_eq!(report.verification, VerificationOutcome::FailedNonFatal);
        assert!(!report.verification_passed());
    }

    #[test]
    fn clean_run_reports_success_and_counts() {
        let mut tool = permissive_tool();
        tool.expect_build().returning(|_| Ok(()));

        let report = driver(tool, empty_fs(), MockPrompt::new())
            .run(&config(), Path::new("/tmp"))
            .unwrap();
        assert!(report.verification_passed());
        assert_eq!(report.solution_root, PathBuf::from("/tmp/Shop"));
        assert_eq!(report.log.components_created(), 4);
        assert!(report.log.packages_installed() > 0);
    }

    #[test]
    fn structural_failure_halts_without_reaching_later_stages() {
        let mut tool = MockTool::new();
        tool.expect_is_available().return_const(true);
        tool.expect_create_solution().returning(|_, _| Ok(()));
        tool.expect_create_project().returning(|_, _, _, _, _| {
            Err(ApplicationError::StructuralOperationFailure {
                operation: "dotnet new classlib".into(),
                detail: "exit code 1".into(),
            }
            .into())
        });
        // Fail-fast: nothing past component creation may run.
        tool.expect_add_to_solution().never();
        tool.expect_add_reference().never();
        tool.expect_add_package().never();
        tool.expect_build().never();

        let result = driver(tool, empty_fs(), MockPrompt::new()).run(&config(), Path::new("/tmp"));
        assert!(matches!(
            result,
            Err(StrataError::Application(
                ApplicationError::StructuralOperationFailure { .. }
            ))
        ));
    }
}
