//! Plaintext credential type.
//!
//! Exists only in memory: before encryption on save and after a successful
//! decryption on retrieval. Field names are part of the on-disk contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::Zeroize;

use crate::core::types::KeyId;

/// Access key pair plus extra environment variables.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaintextCredential {
    pub key_id: KeyId,
    pub secret_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub env_vars: BTreeMap<String, String>,
}

impl PlaintextCredential {
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret_key: secret_key.into(),
            env_vars: BTreeMap::new(),
        }
    }

    pub fn with_env_vars(mut self, env_vars: BTreeMap<String, String>) -> Self {
        self.env_vars = env_vars;
        self
    }

    /// Shell `export` lines: the key pair first, then env vars by name.
    ///
    /// Values are double quoted and escaped so `eval` assigns them literally.
    pub fn export_lines(&self) -> Vec<String> {
        let mut lines = vec![
            export_line("AWS_ACCESS_KEY_ID", &self.key_id),
            export_line("AWS_SECRET_ACCESS_KEY", &self.secret_key),
        ];
        lines.extend(
            self.env_vars
                .iter()
                .map(|(name, value)| export_line(name, value)),
        );
        lines
    }
}

fn export_line(name: &str, value: &str) -> String {
    format!("export {}=\"{}\"", name, escape_shell_value(value))
}

fn escape_shell_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' | '"' | '$' | '`' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// Older writers emit `null` for an empty map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Drop for PlaintextCredential {
    fn drop(&mut self) {
        self.secret_key.zeroize();
        for value in self.env_vars.values_mut() {
            value.zeroize();
        }
    }
}

impl std::fmt::Debug for PlaintextCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaintextCredential")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .field("env_vars", &self.env_vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
