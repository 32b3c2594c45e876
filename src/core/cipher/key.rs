//! Key loading.
//!
//! Private keys may be PKCS#1, PKCS#8 or OpenSSH encoded, with or without
//! a passphrase. Public keys are read in `authorized_keys` form.

use std::fs;
use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{dek, fingerprint};
use crate::core::prompt::SecretPrompt;
use crate::core::types::Fingerprint;
use crate::error::{CipherError, Result, StoreError};

/// An RSA private key able to open envelope slots.
pub struct PrivateKey {
    inner: RsaPrivateKey,
    name: String,
}

impl PrivateKey {
    /// Wrap an already-parsed key.
    pub fn from_rsa(inner: RsaPrivateKey, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    /// Read and parse a key file.
    pub fn load(path: &Path, prompt: &dyn SecretPrompt) -> Result<Self> {
        debug!(path = %path.display(), "loading private key");
        let raw = Zeroizing::new(fs::read(path).map_err(|source| StoreError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?);
        Self::parse(&raw, &path.display().to_string(), prompt)
    }

    /// Parse raw key bytes, asking `prompt` for a passphrase when needed.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPrivateKey` if the data is not an RSA
    /// private key, or a decryption error if the passphrase is wrong.
    pub fn parse(raw: &[u8], name: &str, prompt: &dyn SecretPrompt) -> Result<Self> {
        let text = std::str::from_utf8(raw).map_err(|e| invalid(name, e))?;

        if text.contains("BEGIN OPENSSH PRIVATE KEY") {
            return Self::parse_openssh(text, name, prompt);
        }

        let block = ::pem::parse(raw).map_err(|e| invalid(name, e))?;
        let der = if dek::is_encrypted(&block) {
            let passphrase = prompt.passphrase(name)?;
            dek::decrypt(&block, passphrase.as_bytes())?
        } else {
            warn!(key = %name, "private key has no passphrase");
            Zeroizing::new(block.contents().to_vec())
        };

        let inner = match block.tag() {
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(&der).map_err(|e| invalid(name, e))?,
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(&der).map_err(|e| invalid(name, e))?,
            other => return Err(invalid(name, format!("unsupported key type {}", other))),
        };

        Ok(Self::from_rsa(inner, name))
    }

    fn parse_openssh(text: &str, name: &str, prompt: &dyn SecretPrompt) -> Result<Self> {
        let key = ssh_key::PrivateKey::from_openssh(text).map_err(|e| invalid(name, e))?;
        let key = if key.is_encrypted() {
            let passphrase = prompt.passphrase(name)?;
            key.decrypt(passphrase.as_bytes()).map_err(|_| {
                CipherError::DecryptionFailed(format!("incorrect passphrase for {}", name))
            })?
        } else {
            warn!(key = %name, "private key has no passphrase");
            key
        };

        let keypair = key
            .key_data()
            .rsa()
            .ok_or_else(|| invalid(name, "not an RSA key"))?;
        let inner = RsaPrivateKey::try_from(keypair).map_err(|e| invalid(name, e))?;

        Ok(Self::from_rsa(inner, name))
    }

    /// Underlying RSA key.
    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.inner
    }

    /// Display name (usually the file path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fingerprint of the matching public key.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        fingerprint::ssh_private_fingerprint(&self.inner)
    }

    /// Matching SSH public key.
    pub fn public_key(&self) -> Result<ssh_key::PublicKey> {
        fingerprint::ssh_public_key(&self.inner.to_public_key())
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("name", &self.name)
            .field("fingerprint", &self.fingerprint().ok())
            .finish()
    }
}

fn invalid(name: &str, reason: impl std::fmt::Display) -> crate::error::Error {
    CipherError::InvalidPrivateKey {
        name: name.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Parse an `authorized_keys` line. Only RSA keys can receive envelopes.
pub fn parse_public_key(line: &str) -> Result<ssh_key::PublicKey> {
    let key = ssh_key::PublicKey::from_openssh(line.trim())
        .map_err(|e| CipherError::InvalidPublicKey(e.to_string()))?;
    if key.key_data().rsa().is_none() {
        return Err(
            CipherError::InvalidPublicKey(format!("{} is not an RSA key", key.algorithm())).into(),
        );
    }
    Ok(key)
}

/// Read a public key file.
pub fn load_public_key(path: &Path) -> Result<ssh_key::PublicKey> {
    debug!(path = %path.display(), "loading public key");
    let line = fs::read_to_string(path).map_err(|source| StoreError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    parse_public_key(&line)
}
