//! Scaffold execution: merge config defaults, validate, run the pipeline.
//!
//! This is the bridge between the parsed CLI surface and the core pipeline.
//! Flag precedence is CLI > config file > built-in default, resolved here
//! before the option set reaches the validating builder.

use std::io::{self, BufRead, IsTerminal as _, Write as _};
use std::path::Path;

use tracing::{debug, instrument};

use strata_adapters::starter_files;
use strata_adapters::{DotnetCli, LocalFilesystem};
use strata_core::application::ports::Prompter;
use strata_core::application::PipelineDriver;
use strata_core::domain::ScaffoldConfig;
use strata_core::error::StrataResult;

use crate::cli::ScaffoldArgs;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::OutputManager;

/// Run one scaffold from parsed arguments.
#[instrument(skip_all)]
pub fn execute(args: &ScaffoldArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    // ── option resolution ─────────────────────────────────────────────────
    let framework = args
        .framework
        .clone()
        .or_else(|| config.defaults.framework.clone());
    let db_provider = args
        .db_provider
        .clone()
        .or_else(|| config.defaults.db_provider.clone());

    let mut builder = ScaffoldConfig::builder()
        .enable_cqrs(args.enable_cqrs)
        .include_tests(args.include_tests);
    if let Some(name) = &args.name {
        builder = builder.name(name);
    }
    if let Some(framework) = framework {
        builder = builder.framework(framework);
    }
    if let Some(provider) = db_provider {
        builder = builder.db_provider(provider);
    }

    let (scaffold, warnings) = builder.build().map_err(strata_core::error::StrataError::from)?;

    for warning in &warnings {
        output.warning(&warning.to_string())?;
    }

    print_summary(&scaffold, &args.output, output)?;

    // ── pipeline wiring ───────────────────────────────────────────────────
    let driver = PipelineDriver::new(
        Box::new(DotnetCli::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(ConsolePrompter::new()),
        Box::new(output.clone()),
        starter_files::builtin_set()?,
    );

    debug!(name = scaffold.name(), "starting pipeline");
    let report = driver.run(&scaffold, &args.output)?;

    // ── completion summary ────────────────────────────────────────────────
    output.print("")?;
    output.success(&format!(
        "Solution '{}' generated at {}",
        scaffold.name(),
        report.solution_root.display()
    ))?;
    output.info(&format!(
        "{} component(s) created, {} reused, {} package(s) installed, {} file(s) written",
        report.log.components_created(),
        report.log.components_reused(),
        report.log.packages_installed(),
        report.log.files_written(),
    ))?;
    if !report.verification_passed() {
        output.warning("the verification build failed; inspect the generated solution manually")?;
    }

    Ok(())
}

/// Configuration summary printed before the first stage runs.
fn print_summary(
    scaffold: &ScaffoldConfig,
    output_root: &Path,
    output: &OutputManager,
) -> io::Result<()> {
    output.header(&format!("Scaffolding '{}'", scaffold.name()))?;
    output.print(&format!("  Framework:    {}", scaffold.framework().moniker()))?;
    output.print(&format!("  Database:     {}", scaffold.db_provider()))?;
    output.print(&format!(
        "  CQRS:         {}",
        if scaffold.enable_cqrs() { "enabled" } else { "disabled" }
    ))?;
    output.print(&format!(
        "  Tests:        {}",
        if scaffold.include_tests() { "included" } else { "skipped" }
    ))?;
    output.print(&format!("  Output:       {}", output_root.display()))?;
    output.print("")
}

/// Interactive confirmation over stdin.
///
/// Answers default to "no": only an explicit `y`/`yes` continues. A
/// non-interactive stdin (piped input, CI) also answers "no", so unattended
/// runs never silently write into an existing directory.
pub struct ConsolePrompter {
    _private: (),
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn confirm_overwrite(&self, path: &Path) -> StrataResult<bool> {
        if !io::stdin().is_terminal() {
            return Ok(false);
        }

        let mut stderr = io::stderr();
        let _ = write!(
            stderr,
            "Directory '{}' already exists. Continue and overwrite generated files? [y/N] ",
            path.display()
        );
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => {
                let answer = answer.trim().to_ascii_lowercase();
                Ok(answer == "y" || answer == "yes")
            }
            Err(_) => Ok(false),
        }
    }
}
