//! Secret prompt port.
//!
//! Key loading asks for passphrases through [`SecretPrompt`] so the crypto
//! code never touches the terminal directly.

use console::Term;
use dialoguer::Password;
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

/// Source of passphrases for encrypted private keys.
pub trait SecretPrompt {
    /// Ask for the passphrase protecting `key_name`.
    fn passphrase(&self, key_name: &str) -> Result<Zeroizing<String>>;
}

/// Hidden-input prompt on stderr, leaving stdout clean for `eval`.
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn passphrase(&self, key_name: &str) -> Result<Zeroizing<String>> {
        Password::new()
            .with_prompt(format!("Enter passphrase for {}", key_name))
            .allow_empty_password(true)
            .interact_on(&Term::stderr())
            .map(Zeroizing::new)
            .map_err(|e| CipherError::Prompt(e.to_string()).into())
    }
}

/// Fixed passphrase, for non-interactive callers.
pub struct StaticPrompt(Zeroizing<String>);

impl StaticPrompt {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(Zeroizing::new(passphrase.into()))
    }
}

impl SecretPrompt for StaticPrompt {
    fn passphrase(&self, _key_name: &str) -> Result<Zeroizing<String>> {
        Ok(self.0.clone())
    }
}
