//! SSH key fingerprints.
//!
//! MD5 over the public key's SSH wire encoding, rendered as colon-separated
//! lowercase hex (`xx:xx:...`). This is the only link between a private key
//! and its recipient slot in an envelope.

use md5::{Digest, Md5};
use rsa::{RsaPrivateKey, RsaPublicKey};
use ssh_key::public::KeyData;

use crate::core::types::Fingerprint;
use crate::error::{CipherError, Result};

/// Fingerprint of an SSH public key.
pub fn ssh_fingerprint(key: &ssh_key::PublicKey) -> Result<Fingerprint> {
    let wire = key
        .to_bytes()
        .map_err(|e| CipherError::InvalidPublicKey(format!("cannot encode key: {}", e)))?;
    Ok(colon_hex(&Md5::digest(&wire)))
}

/// Fingerprint of the public half of an RSA private key.
pub fn ssh_private_fingerprint(key: &RsaPrivateKey) -> Result<Fingerprint> {
    ssh_fingerprint(&ssh_public_key(&key.to_public_key())?)
}

/// Wrap an RSA public key as an SSH public key.
pub fn ssh_public_key(key: &RsaPublicKey) -> Result<ssh_key::PublicKey> {
    let data = ssh_key::public::RsaPublicKey::try_from(key)
        .map_err(|e| CipherError::InvalidPublicKey(format!("cannot convert key: {}", e)))?;
    Ok(ssh_key::PublicKey::from(KeyData::Rsa(data)))
}

fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
