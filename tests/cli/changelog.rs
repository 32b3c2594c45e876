//! Tests for commits into git-managed stores.

use crate::skip_without_git;
use crate::support::*;
use std::process::Command;

fn git(dir: &std::path::Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_save_commits_into_managed_store() {
    skip_without_git!();
    let t = Test::with_key();
    std::fs::create_dir_all(t.store()).unwrap();
    git(&t.store(), &["init", "--quiet"]);

    assert_success(&t.save_force("alice", "acme", &[]));

    let log = git(&t.store(), &["log", "--format=%an|%s", "--name-only"]);
    let mut lines = log.lines().filter(|l| !l.is_empty());
    assert_eq!(lines.next(), Some("alice|Added by Credulous"));
    let file = lines.next().unwrap();
    assert!(file.starts_with("acme/alice/"), "unexpected path {}", file);
}

#[test]
fn test_save_unmanaged_store_has_no_git() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));
    assert!(!t.store().join(".git").exists());
}
