//! Argument resolution helpers for CLI commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::output;
use crate::core::cipher::load_public_key;
use crate::core::config::Config;
use crate::core::constants::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};
use crate::core::domain::PlaintextCredential;
use crate::core::store::Store;
use crate::error::{ConfigError, Result};

/// Home directory plus the loaded config file.
pub struct Context {
    pub home: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn load() -> Result<Self> {
        let home = Config::home()?;
        let config = Config::load(&home)?;
        Ok(Self { home, config })
    }

    pub fn store(&self, repo: Option<&str>) -> Store {
        let root = self.config.repo(&self.home, repo);
        debug!(root = %root.display(), "using store");
        Store::new(root)
    }

    pub fn private_key(&self, flag: Option<&str>) -> PathBuf {
        self.config.private_key(&self.home, flag)
    }

    /// Read every recipient key.
    pub fn public_keys(&self, flags: &[String]) -> Result<Vec<ssh_key::PublicKey>> {
        self.config
            .public_keys(&self.home, flags)
            .iter()
            .map(|path| load_public_key(path))
            .collect()
    }
}

/// Split `user@account` at the last `@`.
///
/// Returns `(account, user)`.
pub fn split_user_and_account(arg: &str) -> Result<(String, String)> {
    match arg.rfind('@') {
        Some(at) if at >= 1 => Ok((arg[at + 1..].to_string(), arg[..at].to_string())),
        _ => Err(ConfigError::InvalidAccountFormat.into()),
    }
}

/// Whether `arg` looks like `NAME=value` with a valid variable name.
fn is_env_assignment(arg: &str) -> bool {
    let Some((name, _)) = arg.split_once('=') else {
        return false;
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `-e NAME=value` arguments, skipping malformed ones with a warning.
pub fn parse_env_args(args: &[String]) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    for arg in args {
        if !is_env_assignment(arg) {
            output::warn(&format!(
                "skipping '{}': expected NAME=value with a valid variable name",
                arg
            ));
            continue;
        }
        if let Some((name, value)) = arg.split_once('=') {
            vars.insert(name.to_string(), value.to_string());
        }
    }
    vars
}

/// Negative lifetimes mean "forever", same as 0.
pub fn clamp_lifetime(lifetime: i64) -> i64 {
    lifetime.max(0)
}

/// The access key pair from the environment, plus extra env vars.
pub fn credential_from_env(env_args: &[String]) -> Result<PlaintextCredential> {
    let key_id = std::env::var(ENV_ACCESS_KEY_ID).unwrap_or_default();
    let secret = std::env::var(ENV_SECRET_ACCESS_KEY).unwrap_or_default();
    if key_id.is_empty() || secret.is_empty() {
        return Err(ConfigError::MissingCredentials.into());
    }
    Ok(PlaintextCredential::new(key_id, secret).with_env_vars(parse_env_args(env_args)))
}
