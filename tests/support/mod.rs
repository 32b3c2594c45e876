//! Test support utilities for credulous integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir. Child processes get
/// HOME pointed at the temp home, so the default store
/// (`~/.credulous/local`) and keys (`~/.ssh/id_rsa`) are private to the test.
pub struct Test {
    /// Working directory for child commands
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a default SSH keypair in `~/.ssh`.
    pub fn with_key() -> Self {
        let t = Self::new();
        t.write_keypair("id_rsa");
        t
    }

    /// Default store root.
    pub fn store(&self) -> PathBuf {
        self.home.path().join(".credulous").join("local")
    }

    /// `~/.ssh/<name>`.
    pub fn ssh_path(&self, name: &str) -> PathBuf {
        self.home.path().join(".ssh").join(name)
    }

    /// Generate a keypair as `~/.ssh/<name>` and `~/.ssh/<name>.pub`.
    pub fn write_keypair(&self, name: &str) -> Keypair {
        let keypair = Keypair::generate();
        keypair.write_to(&self.ssh_path(name));
        keypair
    }

    /// Envelope files saved for `identity@alias`, sorted.
    pub fn envelopes(&self, alias: &str, identity: &str) -> Vec<String> {
        let dir = self.store().join(alias).join(identity);
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
