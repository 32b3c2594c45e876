//! Tests for `credulous save`.

use crate::support::*;
use std::fs;

#[test]
fn test_save_force_writes_envelope() {
    let t = Test::with_key();

    let output = t.save_force("alice", "acme", &[]);
    assert_success(&output);
    assert_stderr_contains(&output, "alice@acme");

    let files = t.envelopes("acme", "alice");
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(&format!("-{}.json", KEY_SUFFIX)));
}

#[test]
fn test_save_envelope_contents() {
    let t = Test::new();
    let keypair = t.write_keypair("id_rsa");
    assert_success(&t.save_force("alice", "acme", &["-l", "3600"]));

    let name = &t.envelopes("acme", "alice")[0];
    let raw = fs::read_to_string(t.store().join("acme/alice").join(name)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["Version"], "2014-06-12");
    assert_eq!(json["IamUsername"], "alice");
    assert_eq!(json["AccountAliasOrId"], "acme");
    assert_eq!(json["LifeTime"], 3600);
    assert!(name.starts_with(json["CreateTime"].as_str().unwrap()));

    let slots = json["Encryptions"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["Fingerprint"], keypair.fingerprint().as_str());
    assert!(!raw.contains(SECRET), "secret must not be stored in clear");
}

#[test]
fn test_save_negative_lifetime_is_zero() {
    let t = Test::with_key();
    assert_success(&t.save_force("alice", "acme", &["-l", "-30"]));

    let name = &t.envelopes("acme", "alice")[0];
    let raw = fs::read_to_string(t.store().join("acme/alice").join(name)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["LifeTime"], 0);
}

#[test]
fn test_save_one_slot_per_public_key() {
    let t = Test::new();
    let alice = t.write_keypair("alice");
    let bob = t.write_keypair("bob");

    let alice_pub = t.ssh_path("alice.pub");
    let bob_pub = t.ssh_path("bob.pub");
    let output = t.save_force(
        "alice",
        "acme",
        &[
            "-k",
            alice_pub.to_str().unwrap(),
            "-k",
            bob_pub.to_str().unwrap(),
        ],
    );
    assert_success(&output);

    let name = &t.envelopes("acme", "alice")[0];
    let raw = fs::read_to_string(t.store().join("acme/alice").join(name)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let fingerprints: Vec<&str> = json["Encryptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["Fingerprint"].as_str().unwrap())
        .collect();
    assert_eq!(fingerprints, vec![alice.fingerprint(), bob.fingerprint()]);
}

#[test]
fn test_save_custom_repo() {
    let t = Test::with_key();
    let repo = t.dir.path().join("team-creds");

    let output = t.save_force("alice", "acme", &["-r", repo.to_str().unwrap()]);
    assert_success(&output);
    assert!(repo.join("acme/alice").is_dir());
    assert!(!t.store().exists());
}

#[test]
fn test_save_repo_from_config_file() {
    let t = Test::with_key();
    let repo = t.dir.path().join("configured");
    fs::create_dir_all(t.home.path().join(".credulous")).unwrap();
    fs::write(
        t.home.path().join(".credulous/config.toml"),
        format!("[defaults]\nrepo = \"{}\"\n", repo.display()),
    )
    .unwrap();

    assert_success(&t.save_force("alice", "acme", &[]));
    assert!(repo.join("acme/alice").is_dir());
}

#[test]
fn test_save_skips_malformed_env_args() {
    let t = Test::with_key();

    let output = t.save_force("alice", "acme", &["-e", "GOOD=1", "-e", "9BAD=2"]);
    assert_success(&output);
    assert_stderr_contains(&output, "9BAD=2");

    let output = t.source_force(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "export GOOD=\"1\"");
    assert_stdout_excludes(&output, "9BAD");
}

#[test]
fn test_save_without_env_credentials_fails() {
    let t = Test::with_key();

    let output = t
        .cmd()
        .args(["save", "--force", "-u", "alice", "-a", "acme"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no credentials in the environment");
}

#[test]
fn test_save_force_requires_username_and_account() {
    let t = Test::with_key();

    let output = t
        .cmd_with_creds(KEY_ID, SECRET)
        .args(["save", "--force", "-u", "alice"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "both username and account");
}

#[test]
fn test_save_username_without_force_fails() {
    let t = Test::with_key();

    let output = t
        .cmd_with_creds(KEY_ID, SECRET)
        .args(["save", "-u", "alice", "-a", "acme"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "without --force");
}

#[test]
fn test_save_missing_public_key_fails() {
    let t = Test::new();

    let output = t.save_force("alice", "acme", &[]);
    assert_failure(&output);
    assert!(!t.store().join("acme").exists());
}

#[cfg(not(feature = "aws"))]
#[test]
fn test_save_without_force_needs_provider() {
    let t = Test::with_key();

    let output = t.cmd_with_creds(KEY_ID, SECRET).arg("save").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "not available");
}
