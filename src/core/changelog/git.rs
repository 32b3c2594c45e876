//! Git change-log backend using the `git` CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};

use super::{Persister, StoreDetector};
use crate::error::{PersistError, Result};

/// Git CLI backend.
#[derive(Debug, Default)]
pub struct Git;

impl Git {
    fn binary() -> Result<PathBuf> {
        which::which("git").map_err(|_| PersistError::GitNotFound.into())
    }

    /// Run `git -C root <args>` with `author` as author and committer.
    fn run(root: &Path, args: &[&str], author: &str) -> Result<String> {
        let email = format!(
            "{}@{}",
            whoami::username(),
            whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string())
        );

        trace!(root = %root.display(), ?args, "running git");
        let output = Command::new(Self::binary()?)
            .arg("-C")
            .arg(root)
            .args(args)
            .env("GIT_AUTHOR_NAME", author)
            .env("GIT_AUTHOR_EMAIL", &email)
            .env("GIT_COMMITTER_NAME", author)
            .env("GIT_COMMITTER_EMAIL", &email)
            .output()
            .map_err(|e| PersistError::Git {
                command: args.join(" "),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PersistError::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl StoreDetector for Git {
    fn is_managed(&self, root: &Path) -> Result<bool> {
        Ok(root.join(".git").is_dir())
    }
}

impl Persister for Git {
    fn commit(&self, root: &Path, relative: &Path, message: &str, author: &str) -> Result<String> {
        let file = relative.to_string_lossy().into_owned();
        Self::run(root, &["add", "--", file.as_str()], author)?;
        Self::run(
            root,
            &["commit", "--quiet", "-m", message, "--", file.as_str()],
            author,
        )?;
        let id = Self::run(root, &["rev-parse", "HEAD"], author)?;

        debug!(commit = %id, file = %file, "committed envelope");
        Ok(id)
    }
}
