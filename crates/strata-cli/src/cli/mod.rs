//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and defaults.  No validation logic lives here: option values are
//! passed through as strings so the configuration validator owns the rules
//! (and the error messages) for every one of them.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered .NET solution scaffolding",
    long_about = "Strata generates a clean-architecture .NET solution: layered \
                  projects, reference wiring, pinned packages, and starter files, \
                  verified with a final build.",
    after_help = "EXAMPLES:\n\
        \x20 strata --name Shop\n\
        \x20 strata --name Shop --db-provider postgres --include-tests\n\
        \x20 strata --name OrderService --enable-cqrs --framework net9.0"
)]
pub struct Cli {
    #[command(flatten)]
    pub scaffold: ScaffoldArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

// ── scaffolding options ───────────────────────────────────────────────────────

/// The scaffolding option set, mirrored 1:1 into the configuration builder.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Solution name; propagated into every generated identifier and path.
    ///
    /// Optional at the parser level so that the validator reports the
    /// missing-option error with its own suggestions.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Solution name")]
    pub name: Option<String>,

    /// Organize the Application layer around commands/queries/handlers.
    #[arg(
        long = "enable-cqrs",
        help = "Add CQRS sub-paths and a mediation package"
    )]
    pub enable_cqrs: bool,

    /// Target framework moniker, e.g. net8.0.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "MONIKER",
        help = "Target framework (e.g. net8.0); unrecognized values pass through with a warning"
    )]
    pub framework: Option<String>,

    /// Database provider.
    #[arg(
        short = 'd',
        long = "db-provider",
        value_name = "PROVIDER",
        help = "Database provider: sqlserver, postgres, or sqlite [default: sqlserver]"
    )]
    pub db_provider: Option<String>,

    /// Generate xUnit test projects alongside the solution.
    #[arg(long = "include-tests", help = "Add test projects for each layer")]
    pub include_tests: bool,

    /// Directory the solution directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory (default: current directory)"
    )]
    pub output: PathBuf,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_minimal_invocation() {
        let cli = Cli::parse_from(["strata", "--name", "Shop"]);
        assert_eq!(cli.scaffold.name.as_deref(), Some("Shop"));
        assert!(!cli.scaffold.enable_cqrs);
        assert!(!cli.scaffold.include_tests);
        assert_eq!(cli.scaffold.output, PathBuf::from("."));
    }

    #[test]
    fn parse_full_invocation() {
        let cli = Cli::parse_from([
            "strata",
            "--name",
            "Shop",
            "--enable-cqrs",
            "--include-tests",
            "--framework",
            "net9.0",
            "--db-provider",
            "postgres",
            "--output",
            "/tmp/out",
        ]);
        assert!(cli.scaffold.enable_cqrs);
        assert!(cli.scaffold.include_tests);
        assert_eq!(cli.scaffold.framework.as_deref(), Some("net9.0"));
        assert_eq!(cli.scaffold.db_provider.as_deref(), Some("postgres"));
    }

    #[test]
    fn name_is_optional_at_parse_time() {
        // Missing --name must reach the validator, not die in clap.
        let cli = Cli::parse_from(["strata"]);
        assert!(cli.scaffold.name.is_none());
    }

    #[test]
    fn provider_value_is_not_parsed_by_clap() {
        // Even nonsense providers parse; the validator rejects them.
        let cli = Cli::parse_from(["strata", "--name", "Shop", "--db-provider", "mongodb"]);
        assert_eq!(cli.scaffold.db_provider.as_deref(), Some("mongodb"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["strata", "--name", "Shop", "--bogus"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["strata", "--name", "Shop", "-q", "-v"]).is_err());
    }
}
