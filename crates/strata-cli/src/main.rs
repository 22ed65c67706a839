//! Strata CLI entry point.
//!
//! Startup is strictly ordered: arguments parse first, logging second, config
//! third, and only then does any scaffolding work begin. Exit codes are flat:
//! `0` for success (including a failed verification build) and `1` for every
//! fatal error.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod error;
mod logging;
mod output;
mod scaffold;

use cli::Cli;
use config::AppConfig;
use error::CliError;
use output::OutputManager;

fn main() -> ExitCode {
    // 1. Environment files are best-effort; a missing .env is normal.
    let _ = dotenvy::dotenv();

    // 2. Parse arguments. Clap renders its own message for --help/--version
    //    (exit 0) and for malformed invocations (exit 1).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::from(1),
            };
        }
    };

    // 3. Logging before anything that might emit events.
    if let Err(err) = logging::init_logging(&cli.global) {
        eprintln!("Warning: {err}");
    }

    // 4. Configuration file, then the output manager it feeds.
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            return handle_error(
                &CliError::ConfigError {
                    message: err.to_string(),
                    source: None,
                },
                &cli.global,
            );
        }
    };
    let output = OutputManager::new(&cli.global, &config);

    // 5. Run.
    match scaffold::execute(&cli.scaffold, &config, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => handle_error(&err, &cli.global),
    }
}

/// Log the error, print it on stderr, and pick the exit code.
fn handle_error(err: &CliError, global: &cli::GlobalArgs) -> ExitCode {
    err.log();

    let verbose = global.verbose > 0;
    let colored = !global.no_color && std::io::stderr().is_terminal();
    let rendered = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{rendered}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_matches_manifest() {
        let version = Cli::command().get_version().map(str::to_owned);
        assert_eq!(version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
    }
}
