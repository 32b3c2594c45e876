//! Identity provider capabilities.
//!
//! The provider is only ever a data source. Each capability is its own
//! trait so callers ask for exactly what they use: validation needs the two
//! getters, rotation needs the key lister, deleter and creator.
//!
//! [`Iam`] (feature `aws`) implements all of them against AWS IAM;
//! [`Offline`] refuses every call.

use chrono::{DateTime, Utc};

use crate::core::domain::AccessKey;
use crate::core::types::{AccountAlias, IdentityName};
use crate::error::{ProviderError, Result};

#[cfg(feature = "aws")]
mod aws;

#[cfg(feature = "aws")]
pub use aws::Iam;

/// Login name of the caller.
pub trait IdentityGetter {
    fn current_identity(&self) -> Result<IdentityName>;
}

/// Alias of the caller's account, falling back to the identity name when
/// the account has none.
pub trait AliasGetter {
    fn current_alias(&self) -> Result<AccountAlias>;
}

/// Every access key of an identity, in provider order.
pub trait AccessKeyLister {
    fn list_access_keys(&self, identity: &str) -> Result<Vec<AccessKey>>;
}

pub trait AccessKeyDeleter {
    fn delete_access_key(&self, key: &AccessKey) -> Result<()>;
}

/// Issue a new key; the returned key carries its secret.
pub trait AccessKeyCreator {
    fn create_access_key(&self, identity: &str) -> Result<AccessKey>;
}

/// Creation time of the key currently in use.
pub trait KeyCreationTimeGetter {
    fn key_creation_time(&self, identity: &str, key_id: &str) -> Result<DateTime<Utc>>;
}

/// Everything a full provider offers.
pub trait IdentityProvider:
    IdentityGetter
    + AliasGetter
    + AccessKeyLister
    + AccessKeyDeleter
    + AccessKeyCreator
    + KeyCreationTimeGetter
{
}

impl<T> IdentityProvider for T where
    T: IdentityGetter
        + AliasGetter
        + AccessKeyLister
        + AccessKeyDeleter
        + AccessKeyCreator
        + KeyCreationTimeGetter
{
}

/// Resolve the creation time of `key_id` from a key listing.
pub fn creation_time_from_listing(
    lister: &dyn AccessKeyLister,
    identity: &str,
    key_id: &str,
) -> Result<DateTime<Utc>> {
    lister
        .list_access_keys(identity)?
        .into_iter()
        .find(|key| key.key_id == key_id)
        .map(|key| key.created)
        .ok_or_else(|| {
            ProviderError::KeyNotFound {
                identity: identity.to_string(),
                key_id: key_id.to_string(),
            }
            .into()
        })
}

/// Provider for builds without a backend.
pub struct Offline;

impl Offline {
    fn refuse<T>() -> Result<T> {
        Err(ProviderError::Unavailable(
            "built without AWS support; rebuild with `--features aws` or use --force".into(),
        )
        .into())
    }
}

impl IdentityGetter for Offline {
    fn current_identity(&self) -> Result<IdentityName> {
        Self::refuse()
    }
}

impl AliasGetter for Offline {
    fn current_alias(&self) -> Result<AccountAlias> {
        Self::refuse()
    }
}

impl AccessKeyLister for Offline {
    fn list_access_keys(&self, _identity: &str) -> Result<Vec<AccessKey>> {
        Self::refuse()
    }
}

impl AccessKeyDeleter for Offline {
    fn delete_access_key(&self, _key: &AccessKey) -> Result<()> {
        Self::refuse()
    }
}

impl AccessKeyCreator for Offline {
    fn create_access_key(&self, _identity: &str) -> Result<AccessKey> {
        Self::refuse()
    }
}

impl KeyCreationTimeGetter for Offline {
    fn key_creation_time(&self, _identity: &str, _key_id: &str) -> Result<DateTime<Utc>> {
        Self::refuse()
    }
}

/// The provider compiled into this build.
pub fn default_provider() -> Result<Box<dyn IdentityProvider>> {
    #[cfg(feature = "aws")]
    {
        Ok(Box::new(Iam::connect()?))
    }
    #[cfg(not(feature = "aws"))]
    {
        Ok(Box::new(Offline))
    }
}
