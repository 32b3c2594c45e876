//! Cryptographic operations.
//!
//! Envelopes carry one ciphertext per recipient. The current format is
//! [`Hybrid`]; [`legacy`] can still open slots written by older releases.
//!
//! Keys are plain RSA: recipients are OpenSSH public keys, identities are
//! private keys loaded through [`PrivateKey`].

use rsa::{Oaep, RsaPublicKey};

use crate::core::constants::OAEP_LABEL;
use crate::error::{CipherError, Result};

mod dek;
mod hybrid;
mod key;

pub mod fingerprint;
pub mod legacy;

pub use fingerprint::{ssh_fingerprint, ssh_private_fingerprint, ssh_public_key};
pub use hybrid::Hybrid;
pub use key::{load_public_key, parse_public_key, PrivateKey};

/// Cryptographic backend trait.
///
/// One recipient per call: every envelope slot is sealed independently so
/// each key holder can open their own slot without the others.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt plaintext for a single recipient.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &str, recipient: &Self::Recipient) -> Result<String>;

    /// Decrypt a ciphertext produced by [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if decryption fails or the key doesn't match.
    fn decrypt(
        &self,
        ciphertext: &str,
        identity: &Self::Identity,
    ) -> Result<zeroize::Zeroizing<String>>;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// RSA-OAEP with SHA-1 and the fixed label every envelope uses.
pub(crate) fn oaep() -> Oaep {
    Oaep::new_with_label::<sha1::Sha1, _>(OAEP_LABEL)
}

/// Extract the RSA key from an SSH public key.
pub(crate) fn rsa_public_key(key: &ssh_key::PublicKey) -> Result<RsaPublicKey> {
    let data = key
        .key_data()
        .rsa()
        .ok_or_else(|| CipherError::InvalidPublicKey(format!("{} is not an RSA key", key.algorithm())))?;
    RsaPublicKey::try_from(data)
        .map_err(|e| CipherError::InvalidPublicKey(format!("cannot convert key: {}", e)).into())
}

/// Encrypt plaintext for one recipient with the current format.
///
/// Convenience wrapper around `Hybrid::encrypt`.
pub fn encode(plaintext: &str, recipient: &ssh_key::PublicKey) -> Result<String> {
    Hybrid.encrypt(plaintext, recipient)
}

/// Decrypt a current-format ciphertext.
///
/// Convenience wrapper around `Hybrid::decrypt`.
pub fn decode_aes(ciphertext: &str, key: &PrivateKey) -> Result<zeroize::Zeroizing<String>> {
    Hybrid.decrypt(ciphertext, key.as_rsa())
}
