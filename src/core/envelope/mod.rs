//! Credential envelope documents.
//!
//! An envelope is the JSON file persisted in the store: identity claims plus
//! one ciphertext of the same [`PlaintextCredential`] per recipient. Field
//! names and version strings are read by older releases and must not change.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::cipher::{ssh_fingerprint, Cipher, Hybrid, PrivateKey};
use crate::core::domain::PlaintextCredential;
use crate::core::types::{AccountAlias, Fingerprint, IdentityName};
use crate::error::{CipherError, Result, StoreError};

mod format;

pub use format::Format;

/// Ciphertext sealed for one recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientEncryption {
    pub fingerprint: Fingerprint,
    pub ciphertext: String,
    /// Populated only after this slot has been opened.
    #[serde(skip)]
    pub decoded: Option<PlaintextCredential>,
}

/// Persisted credential document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "IamUsername")]
    pub identity: IdentityName,
    #[serde(rename = "AccountAliasOrId")]
    pub alias: AccountAlias,
    /// Unix epoch seconds, as a decimal string.
    #[serde(rename = "CreateTime")]
    pub create_time: String,
    /// Lifetime in seconds; 0 means unlimited.
    #[serde(rename = "LifeTime")]
    pub lifetime: i64,
    #[serde(rename = "Encryptions")]
    pub encryptions: Vec<RecipientEncryption>,
    /// Only present in legacy salted envelopes.
    #[serde(rename = "Salt", default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl Envelope {
    /// Encrypt `credential` once per recipient in the current format.
    pub fn seal(
        credential: &PlaintextCredential,
        identity: &str,
        alias: &str,
        create_time: i64,
        lifetime: i64,
        recipients: &[ssh_key::PublicKey],
    ) -> Result<Self> {
        let plaintext = Zeroizing::new(serde_json::to_string(credential)?);

        let encryptions = recipients
            .iter()
            .map(|recipient| -> Result<RecipientEncryption> {
                let fingerprint = ssh_fingerprint(recipient)?;
                trace!(%fingerprint, "sealing for recipient");
                Ok(RecipientEncryption {
                    fingerprint,
                    ciphertext: Hybrid.encrypt(&plaintext, recipient)?,
                    decoded: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            identity,
            alias,
            recipients = encryptions.len(),
            "sealed envelope"
        );

        Ok(Self {
            version: Format::Hybrid.version().to_string(),
            identity: identity.to_string(),
            alias: alias.to_string(),
            create_time: create_time.to_string(),
            lifetime: lifetime.max(0),
            encryptions,
            salt: None,
        })
    }

    /// Index of the first slot sealed for `fingerprint`.
    pub fn slot_for(&self, fingerprint: &str) -> Option<usize> {
        self.encryptions
            .iter()
            .position(|slot| slot.fingerprint == fingerprint)
    }

    /// The first opened slot's credential, if any.
    pub fn decoded(&self) -> Option<&PlaintextCredential> {
        self.encryptions.iter().find_map(|slot| slot.decoded.as_ref())
    }

    /// Pretty JSON as written to disk.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse an envelope and open the slot matching `fingerprint`.
///
/// The decoded credential is attached to the matched slot; every other slot
/// keeps `decoded: None`.
///
/// # Errors
///
/// Returns `StoreError::NoMatchingRecipient` if no slot was sealed for the
/// key, `CipherError::UnsupportedFormat` for an unknown `Version`, or a
/// decryption error if the slot cannot be opened.
pub fn read_credentials(raw: &[u8], fingerprint: &str, key: &PrivateKey) -> Result<Envelope> {
    let mut envelope: Envelope = serde_json::from_slice(raw)?;

    let index = envelope
        .slot_for(fingerprint)
        .ok_or_else(|| StoreError::NoMatchingRecipient(key.name().to_string()))?;
    let format = Format::for_version(&envelope.version)
        .ok_or_else(|| CipherError::UnsupportedFormat(envelope.version.clone()))?;

    debug!(
        version = %envelope.version,
        slot = index,
        %fingerprint,
        "opening envelope"
    );

    let plaintext = format.decode(&envelope, &envelope.encryptions[index], key)?;
    let credential: PlaintextCredential = serde_json::from_str(&plaintext)
        .map_err(|e| CipherError::DecryptionFailed(format!("invalid credential: {}", e)))?;
    envelope.encryptions[index].decoded = Some(credential);

    Ok(envelope)
}
