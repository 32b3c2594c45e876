//! AWS IAM identity provider.
//!
//! Enable with `--features aws`. Credentials come from the default AWS
//! provider chain (AWS_ACCESS_KEY_ID, profiles, instance metadata).

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, trace, warn};

use super::{
    creation_time_from_listing, AccessKeyCreator, AccessKeyDeleter, AccessKeyLister, AliasGetter,
    IdentityGetter, KeyCreationTimeGetter,
};
use crate::core::domain::{AccessKey, KeyStatus};
use crate::core::types::{AccountAlias, IdentityName};
use crate::error::{ProviderError, Result};

/// IAM client on a private current-thread runtime.
pub struct Iam {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_iam::Client,
}

impl Iam {
    /// Load AWS configuration and build a client.
    pub fn connect() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to create runtime: {}", e)))?;

        let config = runtime
            .block_on(aws_config::load_defaults(aws_config::BehaviorVersion::latest()));
        let client = aws_sdk_iam::Client::new(&config);

        Ok(Self { runtime, client })
    }
}

fn request_failed(call: &str, e: impl std::fmt::Display) -> crate::error::Error {
    ProviderError::Request(format!("{} failed: {}", call, e)).into()
}

/// A key's `CreateDate`; rotation orders keys by it, so it is required.
fn to_utc(
    key_id: &str,
    date: Option<&aws_sdk_iam::primitives::DateTime>,
) -> Result<DateTime<Utc>> {
    date.and_then(|d| Utc.timestamp_opt(d.secs(), d.subsec_nanos()).single())
        .ok_or_else(|| {
            ProviderError::Request(format!("no creation date for access key {}", key_id)).into()
        })
}

impl IdentityGetter for Iam {
    fn current_identity(&self) -> Result<IdentityName> {
        trace!("iam get-user");
        let output = self
            .runtime
            .block_on(self.client.get_user().send())
            .map_err(|e| request_failed("GetUser", e))?;

        Ok(output
            .user()
            .map(|user| user.user_name().to_string())
            .unwrap_or_default())
    }
}

impl AliasGetter for Iam {
    fn current_alias(&self) -> Result<AccountAlias> {
        trace!("iam list-account-aliases");
        let output = self
            .runtime
            .block_on(self.client.list_account_aliases().send())
            .map_err(|e| request_failed("ListAccountAliases", e))?;

        match output.account_aliases().first() {
            Some(alias) => Ok(alias.clone()),
            None => {
                debug!("account has no alias, using identity name");
                self.current_identity()
            }
        }
    }
}

impl AccessKeyLister for Iam {
    fn list_access_keys(&self, identity: &str) -> Result<Vec<AccessKey>> {
        trace!(identity, "iam list-access-keys");
        let output = self
            .runtime
            .block_on(self.client.list_access_keys().user_name(identity).send())
            .map_err(|e| request_failed("ListAccessKeys", e))?;

        output
            .access_key_metadata()
            .iter()
            .map(|meta| -> Result<AccessKey> {
                let key_id = meta.access_key_id().unwrap_or_default();
                Ok(AccessKey::new(
                    meta.user_name().unwrap_or(identity),
                    key_id,
                    KeyStatus::from_provider(meta.status().map(|s| s.as_str()).unwrap_or_default()),
                    to_utc(key_id, meta.create_date())?,
                ))
            })
            .collect()
    }
}

impl AccessKeyDeleter for Iam {
    fn delete_access_key(&self, key: &AccessKey) -> Result<()> {
        debug!(identity = %key.identity, key_id = %key.key_id, "deleting access key");
        self.runtime
            .block_on(
                self.client
                    .delete_access_key()
                    .user_name(&key.identity)
                    .access_key_id(&key.key_id)
                    .send(),
            )
            .map_err(|e| request_failed("DeleteAccessKey", e))?;
        Ok(())
    }
}

impl AccessKeyCreator for Iam {
    fn create_access_key(&self, identity: &str) -> Result<AccessKey> {
        debug!(identity, "creating access key");
        let output = self
            .runtime
            .block_on(self.client.create_access_key().user_name(identity).send())
            .map_err(|e| request_failed("CreateAccessKey", e))?;

        let created = output
            .access_key()
            .ok_or_else(|| request_failed("CreateAccessKey", "no key returned"))?;

        // The key exists from here on; its secret must reach the caller.
        let created_at = to_utc(created.access_key_id(), created.create_date()).unwrap_or_else(|e| {
            warn!(key_id = %created.access_key_id(), error = %e, "using current time");
            Utc::now()
        });

        Ok(AccessKey::new(
            created.user_name(),
            created.access_key_id(),
            KeyStatus::from_provider(created.status().as_str()),
            created_at,
        )
        .with_secret(created.secret_access_key()))
    }
}

impl KeyCreationTimeGetter for Iam {
    fn key_creation_time(&self, identity: &str, key_id: &str) -> Result<DateTime<Utc>> {
        creation_time_from_listing(self, identity, key_id)
    }
}
