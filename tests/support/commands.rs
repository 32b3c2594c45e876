//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a credulous command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test working directory
    /// - No AWS or CREDULOUS_* variables inherited from the caller
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("credulous").expect("failed to find credulous binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in [
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "CREDULOUS_REPO",
            "CREDULOUS_PRIVATE_KEY",
            "CREDULOUS_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// A command with an AWS key pair in the environment.
    pub fn cmd_with_creds(&self, key_id: &str, secret: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AWS_ACCESS_KEY_ID", key_id);
        cmd.env("AWS_SECRET_ACCESS_KEY", secret);
        cmd
    }

    /// Shortcut for `credulous save --force -u <user> -a <account>`.
    pub fn save_force(&self, user: &str, account: &str, extra: &[&str]) -> Output {
        self.cmd_with_creds(super::KEY_ID, super::SECRET)
            .args(["save", "--force", "-u", user, "-a", account])
            .args(extra)
            .output()
            .expect("failed to run credulous save")
    }

    /// Shortcut for `credulous source --force`.
    pub fn source_force(&self, extra: &[&str]) -> Output {
        self.cmd()
            .args(["source", "--force"])
            .args(extra)
            .output()
            .expect("failed to run credulous source")
    }

    /// Shortcut for `credulous list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run credulous list")
    }
}
