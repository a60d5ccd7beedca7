//! CLI behavior tests for the pipsolve binary
//!
//! Network-dependent behavior is exercised against an unroutable index
//! URL so runs fail fast and deterministically.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn pipsolve() -> Command {
    Command::cargo_bin("pipsolve").unwrap()
}

/// Args that make every index request fail immediately
const DEAD_INDEX: &[&str] = &["--index-url", "http://127.0.0.1:9/pypi", "--timeout", "1"];

#[test]
fn test_help_shows_options() {
    pipsolve()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--packages"))
        .stdout(predicate::str::contains("--input-file"))
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("--python-version"));
}

#[test]
fn test_version_flag() {
    pipsolve()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pipsolve"));
}

#[test]
fn test_no_input_is_an_error() {
    pipsolve()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--packages or --input-file"));
}

#[test]
fn test_both_inputs_rejected() {
    let file = NamedTempFile::new().unwrap();
    pipsolve()
        .args(["-p", "flask", "-f"])
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("conflicting options"));
}

#[test]
fn test_quiet_and_verbose_rejected() {
    pipsolve()
        .args(["-p", "flask", "--quiet", "--verbose"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("conflicting options"));
}

#[test]
fn test_invalid_worker_count_rejected() {
    pipsolve()
        .args(["-p", "flask", "--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker count"));

    pipsolve()
        .args(["-p", "flask", "--workers", "51"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker count"));
}

#[test]
fn test_invalid_strategy_rejected() {
    pipsolve()
        .args(["-p", "flask", "--strategy", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid conflict strategy"));
}

#[test]
fn test_invalid_python_version_rejected() {
    pipsolve()
        .args(["-p", "flask", "--python-version", "three.nine"])
        .args(DEAD_INDEX)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid python version"));
}

#[test]
fn test_invalid_root_spec_rejected() {
    pipsolve()
        .args(["-p", ">=1.0"])
        .args(DEAD_INDEX)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing package name"));
}

#[test]
fn test_missing_input_file_reports_path() {
    pipsolve()
        .args(["-f", "/nonexistent/requirements.in"])
        .args(DEAD_INDEX)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read package list"));
}

#[test]
fn test_unreachable_index_leaves_packages_unresolved() {
    let dir = tempfile::tempdir().unwrap();
    pipsolve()
        .args(["-p", "requests", "-o"])
        .arg(dir.path())
        .args(DEAD_INDEX)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Unresolved:"))
        .stdout(predicate::str::contains("requests"));
}

#[test]
fn test_unreachable_index_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = pipsolve()
        .args(["-p", "requests", "--json", "-o"])
        .arg(dir.path())
        .args(DEAD_INDEX)
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["summary"]["resolved"], 0);
    assert_eq!(parsed["summary"]["unresolved"], 1);
    assert_eq!(parsed["unresolved"][0], "requests");
}

#[test]
fn test_input_file_with_comments() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# roots").unwrap();
    writeln!(file, "requests>=2.0").unwrap();
    file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    pipsolve()
        .arg("-f")
        .arg(file.path())
        .arg("-o")
        .arg(dir.path())
        .args(DEAD_INDEX)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("requests"));
}

#[test]
fn test_nothing_resolved_writes_no_files() {
    let dir = tempfile::tempdir().unwrap();
    pipsolve()
        .args(["-p", "requests", "-o"])
        .arg(dir.path())
        .args(DEAD_INDEX)
        .assert()
        .code(2);

    assert!(!dir.path().join("requirements.txt").exists());
    assert!(!dir.path().join("install.sh").exists());
}
