//! Tests for `credulous source`.

use crate::support::*;

#[test]
fn test_source_prints_exports() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &["-e", "REGION=ap-southeast-2"]));

    let output = t.source_force(&[]);
    assert_success(&output);

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("export AWS_ACCESS_KEY_ID=\"{}\"", KEY_ID),
            format!("export AWS_SECRET_ACCESS_KEY=\"{}\"", SECRET),
            "export REGION=\"ap-southeast-2\"".to_string(),
        ]
    );
}

#[test]
fn test_source_verbose_keeps_stdout_clean() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));

    let output = t
        .cmd()
        .args(["--verbose", "source", "--force"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(stdout(&output).lines().all(|l| l.starts_with("export ")));
}

#[test]
fn test_source_by_target_forms() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));
    assert_success(&t.save_force("bob", "acme", &[]));

    assert_success(&t.source_force(&["alice@acme"]));
    assert_success(&t.source_force(&["-c", "bob@acme"]));
    assert_success(&t.source_force(&["-a", "acme", "-u", "bob"]));
}

#[test]
fn test_source_ambiguous_user() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));
    assert_success(&t.save_force("bob", "acme", &[]));

    let output = t.source_force(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "more than one");
}

#[test]
fn test_source_invalid_target() {
    let t = Test::with_key();

    let output = t.source_force(&["@acme"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "<username>@<account>");
}

#[test]
fn test_source_nothing_saved() {
    let t = Test::with_key();

    let output = t.source_force(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "credulous save");
}

#[test]
fn test_source_with_second_recipient_key() {
    let t = Test::new();
    t.write_keypair("alice");
    t.write_keypair("bob");
    let alice_pub = t.ssh_path("alice.pub");
    let bob_pub = t.ssh_path("bob.pub");
    assert_success(&t.save_force(
        "alice",
        "acme",
        &[
            "-k",
            alice_pub.to_str().unwrap(),
            "-k",
            bob_pub.to_str().unwrap(),
        ],
    ));

    let bob_key = t.ssh_path("bob");
    let output = t.source_force(&["-k", bob_key.to_str().unwrap()]);
    assert_success(&output);
    assert_stdout_contains(&output, KEY_ID);
}

#[test]
fn test_source_with_unrelated_key_fails() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));
    t.write_keypair("stranger");

    let stranger = t.ssh_path("stranger");
    let output = t
        .cmd()
        .env("CREDULOUS_PRIVATE_KEY", &stranger)
        .args(["source", "--force"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot decrypt");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_source_latest_envelope_wins() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));

    // Older envelopes are never read.
    let dir = t.store().join("acme/alice");
    std::fs::write(dir.join("1000000000-OLD1.json"), "not json").unwrap();

    assert_success(&t.source_force(&[]));
}

#[test]
fn test_unencrypted_key_warning() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));

    let output = t.source_force(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "no passphrase");
}

#[cfg(not(feature = "aws"))]
#[test]
fn test_source_validation_needs_provider() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &[]));

    let output = t.cmd().arg("source").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");
}

#[test]
fn test_source_escapes_env_values() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &["-e", "NOTE=a\"; echo $(id) `id`"]));

    let output = t.source_force(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, r#"export NOTE="a\"; echo \$(id) \`id\`""#);
}
