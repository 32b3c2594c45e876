//! Tests for error handling and general CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("credulous") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "credulous");
}

#[test]
fn test_display_shows_environment() {
    let t = Test::new();

    let output = t
        .cmd_with_creds(KEY_ID, SECRET)
        .arg("display")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, &format!("AWS_ACCESS_KEY_ID: {}", KEY_ID));
    assert_stdout_contains(&output, &format!("AWS_SECRET_ACCESS_KEY: {}", SECRET));
}

#[test]
fn test_malformed_config_reported() {
    let t = Test::with_key();
    std::fs::create_dir_all(t.home.path().join(".credulous")).unwrap();
    std::fs::write(t.home.path().join(".credulous/config.toml"), "[defaults").unwrap();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "config");
}

#[test]
fn test_missing_credentials_hint() {
    let t = Test::with_key();

    t.cmd()
        .args(["save", "--force", "-u", "alice", "-a", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("export AWS_ACCESS_KEY_ID"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_errors_go_to_stderr() {
    let t = Test::new();

    let output = t.source_force(&[]);
    assert_failure(&output);
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains('✗'));
}

#[cfg(not(feature = "aws"))]
#[test]
fn test_current_without_provider() {
    let t = Test::new();

    let output = t.cmd().arg("current").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "not available");
}

#[cfg(not(feature = "aws"))]
#[test]
fn test_rotate_without_provider_touches_nothing() {
    let t = Test::with_key();

    let output = t.cmd().arg("rotate").output().unwrap();
    assert_failure(&output);
    assert!(!t.store().exists());
}
