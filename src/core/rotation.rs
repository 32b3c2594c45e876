//! Access key rotation.
//!
//! Retires one live key and issues its replacement. No state is kept
//! between steps: if the replacement cannot be created after the victim was
//! deleted, the identity is left with one key fewer and nothing is undone.

use tracing::{debug, info, warn};

use crate::core::domain::{AccessKey, KeyStatus};
use crate::core::provider::{AccessKeyCreator, AccessKeyDeleter, AccessKeyLister};
use crate::error::{Result, RotationError};

/// Pick the key to retire.
///
/// The first inactive key wins outright. Otherwise the oldest key, with
/// ties going to whichever comes first in provider order.
pub fn select_victim(keys: &[AccessKey]) -> Option<&AccessKey> {
    if let Some(inactive) = keys.iter().find(|key| key.status == KeyStatus::Inactive) {
        return Some(inactive);
    }

    keys.iter().fold(None, |oldest: Option<&AccessKey>, key| match oldest {
        Some(current) if current.created <= key.created => Some(current),
        _ => Some(key),
    })
}

/// Delete one key of `identity` and create a new one.
///
/// Returns the new key, including its secret.
///
/// # Errors
///
/// Returns `RotationError::NoKeys` for an identity without keys and
/// `RotationError::OnlyOneKey` when exactly one key exists; in both cases
/// nothing is deleted or created.
pub fn rotate<P>(provider: &P, identity: &str) -> Result<AccessKey>
where
    P: AccessKeyLister + AccessKeyDeleter + AccessKeyCreator + ?Sized,
{
    let keys = provider.list_access_keys(identity)?;
    debug!(identity, keys = keys.len(), "listed access keys");

    match keys.len() {
        0 => return Err(RotationError::NoKeys(identity.to_string()).into()),
        1 => return Err(RotationError::OnlyOneKey.into()),
        _ => {}
    }

    let victim = select_victim(&keys).ok_or(RotationError::NoVictim)?;
    info!(
        identity,
        key_id = %victim.key_id,
        status = %victim.status,
        "retiring access key"
    );
    provider.delete_access_key(victim)?;

    let created = provider.create_access_key(identity).map_err(|e| {
        warn!(
            identity,
            deleted = %victim.key_id,
            "access key deleted but replacement could not be created"
        );
        e
    })?;
    info!(identity, key_id = %created.key_id, "created access key");

    Ok(created)
}
