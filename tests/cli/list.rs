//! Tests for `credulous list`.

use crate::support::*;

#[test]
fn test_list_sorted_pairs() {
    let t = Test::with_key();
    assert_success(&t.save_force("zed", "acme", &[]));
    assert_success(&t.save_force("alice", "widgets", &[]));
    assert_success(&t.save_force("alice", "acme", &[]));

    let output = t.list();
    assert_success(&output);
    assert_eq!(stdout(&output), "alice@acme\nalice@widgets\nzed@acme\n");
}

#[test]
fn test_list_skips_identity_without_envelopes() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));
    std::fs::create_dir_all(t.store().join("other/bob")).unwrap();

    let output = t.list();
    assert_success(&output);
    assert_eq!(stdout(&output), "alice@acme\n");
}

#[test]
fn test_list_empty_store() {
    let t = Test::new();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "no saved credentials");
}
