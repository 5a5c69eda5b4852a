//! CLI integration tests for fbxci.
//!
//! The pipeline itself downloads SDKs and drives external tools, so these
//! tests only exercise the argument surface; stage behavior is covered by
//! the unit tests next to each stage.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Get the fbxci binary command.
fn fbxci() -> Command {
    Command::cargo_bin("fbxci").unwrap()
}

#[test]
fn test_help_describes_all_flags() {
    fbxci()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--artifact-path"))
        .stdout(predicate::str::contains("--include-debug"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_unrecognized_flag_is_rejected() {
    fbxci()
        .arg("--resume")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--resume"));
}

#[test]
fn test_artifact_path_requires_a_value() {
    fbxci().arg("--artifact-path").assert().failure();
}

#[test]
fn test_version_requires_a_value() {
    fbxci().arg("--version").assert().failure();
}
