//! Smoke tests for the scicalc CLI
//!
//! These tests run the real binary in scripted mode.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the scicalc binary
fn scicalc() -> Command {
    Command::cargo_bin("scicalc").expect("scicalc binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    scicalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    scicalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--keys"))
        .stdout(predicate::str::contains("--degrees"));
}

#[test]
fn test_interactive_needs_a_terminal() {
    // stdout is a pipe under the test harness
    scicalc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("terminal"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    scicalc().args(["-q", "-v"]).assert().failure();
}

// ============================================================================
// Scripted Mode Tests
// ============================================================================

#[test]
fn test_keys_integer_roundtrip() {
    scicalc()
        .args(["--keys", "1 2 3 ="])
        .assert()
        .success()
        .stdout("123\n");
}

#[test]
fn test_keys_repeated_and_comma_separated() {
    scicalc()
        .args(["--keys", "2,+,3", "--keys", "="])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_keys_float_noise_is_rounded() {
    scicalc()
        .args(["--keys", "0 . 1 + 0 . 2 ="])
        .assert()
        .success()
        .stdout("0.3\n");
}

#[test]
fn test_keys_degrees() {
    scicalc()
        .args(["--degrees", "--keys", "sin 9 0 ) ="])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_keys_memory() {
    scicalc()
        .args(["--keys", "5 M+ AC MR"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_keys_factorial_and_implicit_product() {
    scicalc()
        .args(["--keys", "( 2 + 1 ) ! 2 ="])
        .assert()
        .success()
        .stdout("12\n");
}

#[test]
fn test_keys_decimal_guard() {
    scicalc()
        .args(["--keys", "1 . 2 ."])
        .assert()
        .success()
        .stdout("1.2\n");
}

#[test]
fn test_keys_malformed_expression_shows_error() {
    scicalc()
        .args(["--keys", "1 + ="])
        .assert()
        .success()
        .stdout("Error\n");
}

#[test]
fn test_keys_unknown_token_fails() {
    scicalc()
        .args(["--keys", "1 nope"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn test_keys_empty_fails() {
    scicalc()
        .args(["--keys", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

// ============================================================================
// Configuration and Logging Tests
// ============================================================================

#[test]
fn test_print_config() {
    scicalc()
        .args(["--print-config", "--degrees", "-v", "--keys", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"angle_mode\": \"degrees\""))
        .stdout(predicate::str::contains("\"verbosity\": \"Verbose\""))
        .stdout(predicate::str::contains("scripted"));
}

#[test]
fn test_log_file_receives_trace_output() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("calc.log");

    scicalc()
        .env_remove("RUST_LOG")
        .args(["-vv", "--log-file"])
        .arg(&log)
        .args(["--keys", "1 + ="])
        .assert()
        .success()
        .stdout("Error\n");

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("evaluation failed"), "log was: {content}");
}

#[test]
fn test_log_file_in_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("missing").join("calc.log");

    scicalc()
        .arg("--log-file")
        .arg(&log)
        .args(["--keys", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
