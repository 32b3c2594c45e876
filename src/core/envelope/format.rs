//! Envelope format versions.
//!
//! Each known `Version` string maps to one [`Format`]; a new format is a new
//! variant plus a registry entry.

use zeroize::Zeroizing;

use super::{Envelope, RecipientEncryption};
use crate::core::cipher::{legacy, Cipher, Hybrid, PrivateKey};
use crate::core::constants::{FORMAT_VERSION, LEGACY_FORMAT_VERSION};
use crate::error::Result;

/// A decodable envelope format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RSA-OAEP wrapped AES-256-CFB.
    Hybrid,
    /// Direct RSA-OAEP, optionally salted.
    LegacyRsa,
}

const REGISTRY: &[(&str, Format)] = &[
    (FORMAT_VERSION, Format::Hybrid),
    (LEGACY_FORMAT_VERSION, Format::LegacyRsa),
];

impl Format {
    /// Look up the format for a `Version` string.
    pub fn for_version(version: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(known, _)| *known == version)
            .map(|(_, format)| *format)
    }

    /// Version string written for this format.
    pub fn version(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, format)| *format == self)
            .map(|(version, _)| *version)
            .unwrap_or(FORMAT_VERSION)
    }

    /// Recover the plaintext of one recipient slot.
    pub fn decode(
        self,
        envelope: &Envelope,
        slot: &RecipientEncryption,
        key: &PrivateKey,
    ) -> Result<Zeroizing<String>> {
        match self {
            Self::Hybrid => Hybrid.decrypt(&slot.ciphertext, key.as_rsa()),
            Self::LegacyRsa => match envelope.salt.as_deref() {
                Some(salt) => legacy::decode_with_salt(&slot.ciphertext, salt, key.as_rsa()),
                None => legacy::decode_pure_rsa(&slot.ciphertext, key.as_rsa()),
            },
        }
    }
}
