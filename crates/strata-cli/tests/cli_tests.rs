//! End-to-end CLI tests.
//!
//! These only exercise paths that fail before the first external `dotnet`
//! call (argument parsing, validation, config loading), so they run anywhere.

use assert_cmd::Command;
use predicates::prelude::*;

fn strata() -> Command {
    let mut cmd = Command::cargo_bin("strata").expect("binary should build");
    // Keep host environment out of the assertions. Stderr is piped, so the
    // binary falls back to plain formatting on its own.
    cmd.env_remove("NO_COLOR").env_remove("RUST_LOG");
    cmd
}

// ── help and version ──────────────────────────────────────────────────────────

#[test]
fn help_lists_the_option_surface() {
    strata()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--enable-cqrs"))
        .stdout(predicate::str::contains("--framework"))
        .stdout(predicate::str::contains("--db-provider"))
        .stdout(predicate::str::contains("--include-tests"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn version_flag_prints_and_exits_zero() {
    strata()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}

// ── validation failures exit 1 ────────────────────────────────────────────────

#[test]
fn missing_name_is_a_validation_error() {
    strata()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn unknown_db_provider_lists_the_allowed_set() {
    strata()
        .args(["--name", "Shop", "--db-provider", "mongodb"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mongodb"))
        .stderr(predicate::str::contains("sqlserver"))
        .stderr(predicate::str::contains("postgres"))
        .stderr(predicate::str::contains("sqlite"));
}

#[test]
fn name_with_path_separator_is_rejected() {
    strata()
        .args(["--name", "a/b"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("a/b"));
}

#[test]
fn dotfile_name_is_rejected() {
    strata()
        .args(["--name", ".hidden"])
        .assert()
        .failure()
        .code(1);
}

// ── parser-level failures also exit 1 ─────────────────────────────────────────

#[test]
fn unknown_flag_exits_one() {
    strata()
        .args(["--name", "Shop", "--bogus"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn quiet_conflicts_with_verbose() {
    strata()
        .args(["--name", "Shop", "-q", "-v"])
        .assert()
        .failure()
        .code(1);
}

// ── config file handling ──────────────────────────────────────────────────────

#[test]
fn missing_explicit_config_file_is_fatal() {
    strata()
        .args(["--name", "Shop", "--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_config_file_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"not [valid toml").unwrap();

    strata()
        .args(["--name", "Shop"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn config_default_provider_is_validated_like_a_flag() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"[defaults]\ndb_provider = \"oracle\"\n").unwrap();

    strata()
        .args(["--name", "Shop"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("oracle"));
}
