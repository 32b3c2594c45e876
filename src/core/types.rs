//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// MD5 fingerprint of an SSH public key, colon-separated lowercase hex.
pub type Fingerprint = String;

/// Login name of an identity at the provider.
pub type IdentityName = String;

/// Human-readable account alias (or id when no alias exists).
pub type AccountAlias = String;

/// Provider-issued access key identifier.
pub type KeyId = String;

/// Envelope file name (`<epoch>-<key id suffix>.json`).
pub type EnvelopeName = String;
