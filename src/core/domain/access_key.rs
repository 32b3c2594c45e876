//! Access key type.
//!
//! A live credential issued by the identity provider. Never persisted
//! directly; only the plaintext credential derived from it is encrypted.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::core::types::{IdentityName, KeyId};

/// Provider-reported status of an access key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    /// Interpret a provider status string. Anything but "inactive" is active.
    pub fn from_provider(status: &str) -> Self {
        if status.eq_ignore_ascii_case("inactive") {
            Self::Inactive
        } else {
            Self::Active
        }
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// An access key as reported by the identity provider.
#[derive(Clone)]
pub struct AccessKey {
    pub identity: IdentityName,
    pub key_id: KeyId,
    pub status: KeyStatus,
    pub created: DateTime<Utc>,
    /// Secret material, present only on a freshly created key.
    pub secret: Option<Zeroizing<String>>,
}

impl AccessKey {
    /// Metadata-only key, as returned by a listing.
    pub fn new(
        identity: impl Into<String>,
        key_id: impl Into<String>,
        status: KeyStatus,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            key_id: key_id.into(),
            status,
            created,
            secret: None,
        }
    }

    /// Attach secret material (creation responses only).
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(Zeroizing::new(secret.into()));
        self
    }
}

impl std::fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKey")
            .field("identity", &self.identity)
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("created", &self.created)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
