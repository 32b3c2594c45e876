//! User configuration.
//!
//! Settings resolve as: command-line flag (or its environment variable),
//! then `~/.credulous/config.toml`, then built-in defaults.
//!
//! ```toml
//! [defaults]
//! repo = "~/src/team-credentials"
//! private_key = "~/.ssh/credulous_rsa"
//! public_keys = ["~/.ssh/credulous_rsa.pub", "~/keys/ops.pub"]
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    CONFIG_FILE, DEFAULT_PRIVATE_KEY, DEFAULT_PUBLIC_KEY, LOCAL_REPO, ROOT_DIR,
};
use crate::error::{ConfigError, Result};

/// Contents of `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// `[defaults]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Store root, or `local`.
    pub repo: Option<String>,
    /// Private key used by `source`.
    pub private_key: Option<String>,
    /// Recipients used by `save` and `rotate`.
    #[serde(default)]
    pub public_keys: Vec<String>,
}

impl Config {
    /// The caller's home directory.
    pub fn home() -> Result<PathBuf> {
        dirs::home_dir().ok_or_else(|| ConfigError::NoHome.into())
    }

    /// `~/.credulous/config.toml`.
    pub fn path(home: &Path) -> PathBuf {
        home.join(ROOT_DIR).join(CONFIG_FILE)
    }

    /// Load the config file; a missing file yields the defaults.
    pub fn load(home: &Path) -> Result<Self> {
        let path = Self::path(home);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Store root: `flag`, then `defaults.repo`, then `~/.credulous/local`.
    pub fn repo(&self, home: &Path, flag: Option<&str>) -> PathBuf {
        let value = flag.or(self.defaults.repo.as_deref()).unwrap_or(LOCAL_REPO);
        if value == LOCAL_REPO {
            home.join(ROOT_DIR).join(LOCAL_REPO)
        } else {
            expand_home(home, value)
        }
    }

    /// Private key: `flag`, then `defaults.private_key`, then `~/.ssh/id_rsa`.
    pub fn private_key(&self, home: &Path, flag: Option<&str>) -> PathBuf {
        match flag.or(self.defaults.private_key.as_deref()) {
            Some(value) => expand_home(home, value),
            None => home.join(DEFAULT_PRIVATE_KEY),
        }
    }

    /// Public keys: `flags`, then `defaults.public_keys`, then `~/.ssh/id_rsa.pub`.
    pub fn public_keys(&self, home: &Path, flags: &[String]) -> Vec<PathBuf> {
        let chosen = if flags.is_empty() {
            self.defaults.public_keys.as_slice()
        } else {
            flags
        };
        if chosen.is_empty() {
            return vec![home.join(DEFAULT_PUBLIC_KEY)];
        }
        chosen.iter().map(|value| expand_home(home, value)).collect()
    }
}

/// Expand a leading `~/`.
fn expand_home(home: &Path, value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if value == "~" => home.to_path_buf(),
        None => PathBuf::from(value),
    }
}
