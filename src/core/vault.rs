//! Save and retrieve pipelines.
//!
//! Glue over the cipher, envelope, store, change-log and validation
//! modules. Every step runs once; the first failure aborts the operation.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::changelog::ChangeLog;
use crate::core::cipher::PrivateKey;
use crate::core::constants::COMMIT_MESSAGE;
use crate::core::domain::PlaintextCredential;
use crate::core::envelope::{self, Envelope};
use crate::core::provider::{AliasGetter, IdentityGetter, KeyCreationTimeGetter};
use crate::core::store::Store;
use crate::core::types::{AccountAlias, IdentityName};
use crate::core::validation;
use crate::error::{Result, StoreError};

/// Who a credential belongs to and when its key was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub identity: IdentityName,
    pub alias: AccountAlias,
    /// Unix epoch seconds.
    pub create_time: i64,
}

impl Claims {
    /// Caller-supplied claims, stamped with the current time.
    pub fn forced(identity: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            alias: alias.into(),
            create_time: Utc::now().timestamp(),
        }
    }

    /// Claims from the provider, stamped with the creation time of `key_id`.
    pub fn from_provider<P>(provider: &P, key_id: &str) -> Result<Self>
    where
        P: IdentityGetter + AliasGetter + KeyCreationTimeGetter + ?Sized,
    {
        let identity = provider.current_identity()?;
        let alias = provider.current_alias()?;
        let created = provider.key_creation_time(&identity, key_id)?;
        debug!(identity = %identity, alias = %alias, created = %created, "resolved claims");

        Ok(Self {
            identity,
            alias,
            create_time: created.timestamp(),
        })
    }
}

/// Everything needed to write one envelope.
pub struct SaveRequest<'a> {
    pub credential: &'a PlaintextCredential,
    pub claims: Claims,
    /// Seconds; negative values are stored as 0.
    pub lifetime: i64,
    pub recipients: &'a [ssh_key::PublicKey],
}

/// Outcome of a save.
#[derive(Debug)]
pub struct Saved {
    /// Path relative to the store root.
    pub path: PathBuf,
    /// Commit id when the store is managed.
    pub commit: Option<String>,
}

/// Seal, write and (for a managed store) commit a new envelope.
pub fn save(store: &Store, changelog: &dyn ChangeLog, request: &SaveRequest<'_>) -> Result<Saved> {
    let claims = &request.claims;
    info!(identity = %claims.identity, alias = %claims.alias, "saving credentials");

    let envelope = Envelope::seal(
        request.credential,
        &claims.identity,
        &claims.alias,
        claims.create_time,
        request.lifetime,
        request.recipients,
    )?;
    let path = store.save(&envelope, &request.credential.key_id)?;

    let commit = if changelog.is_managed(store.root())? {
        Some(changelog.commit(store.root(), &path, COMMIT_MESSAGE, &claims.identity)?)
    } else {
        debug!(root = %store.root().display(), "store not managed, skipping commit");
        None
    };

    Ok(Saved { path, commit })
}

/// A located and opened envelope.
#[derive(Debug)]
pub struct Retrieved {
    pub alias: AccountAlias,
    pub identity: IdentityName,
    pub path: PathBuf,
    pub envelope: Envelope,
}

impl Retrieved {
    /// The credential opened with the caller's key.
    pub fn credential(&self) -> Result<&PlaintextCredential> {
        self.envelope
            .decoded()
            .ok_or_else(|| StoreError::NoMatchingRecipient(self.path.display().to_string()).into())
    }
}

/// Locate the newest envelope for `identity@alias` and open it with `key`.
///
/// An omitted alias or identity defaults to the only one present.
pub fn retrieve(
    store: &Store,
    key: &PrivateKey,
    alias: Option<&str>,
    identity: Option<&str>,
) -> Result<Retrieved> {
    let alias = match alias {
        Some(alias) => alias.to_string(),
        None => store.default_alias()?,
    };
    let identity = match identity {
        Some(identity) => identity.to_string(),
        None => store.default_identity(&alias)?,
    };

    let path = store.latest(&alias, &identity)?;
    let raw = fs::read(&path).map_err(|source| StoreError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let fingerprint = key.fingerprint()?;
    let envelope = envelope::read_credentials(&raw, &fingerprint, key)?;
    info!(identity = %identity, alias = %alias, path = %path.display(), "opened credentials");

    Ok(Retrieved {
        alias,
        identity,
        path,
        envelope,
    })
}

/// [`retrieve`], then check the envelope's claims against `provider`.
pub fn retrieve_validated<P>(
    store: &Store,
    key: &PrivateKey,
    alias: Option<&str>,
    identity: Option<&str>,
    provider: &P,
) -> Result<Retrieved>
where
    P: IdentityGetter + AliasGetter + ?Sized,
{
    let retrieved = retrieve(store, key, alias, identity)?;
    validation::validate(
        &retrieved.envelope,
        &retrieved.alias,
        &retrieved.identity,
        provider,
    )?;
    Ok(retrieved)
}
