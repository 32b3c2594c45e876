//! Save command.
//!
//! Encrypts the AWS credentials in the environment for every public key and
//! writes a new envelope into the store.

use tracing::debug;

use crate::cli::resolve::{self, Context};
use crate::cli::{output, SaveArgs};
use crate::core::changelog::Git;
use crate::core::provider;
use crate::core::vault::{self, Claims, SaveRequest};
use crate::error::{ConfigError, Result};

/// Execute the save command.
pub fn execute(args: SaveArgs) -> Result<()> {
    let ctx = Context::load()?;
    let credential = resolve::credential_from_env(&args.seal.env)?;

    let claims = if args.force {
        match (args.username, args.account) {
            (Some(username), Some(account)) => Claims::forced(username, account),
            _ => {
                return Err(ConfigError::InvalidArguments(
                    "must specify both username and account with --force".into(),
                )
                .into())
            }
        }
    } else {
        if args.username.is_some() || args.account.is_some() {
            return Err(ConfigError::InvalidArguments(
                "cannot specify username and/or account without --force".into(),
            )
            .into());
        }
        let provider = provider::default_provider()?;
        Claims::from_provider(provider.as_ref(), &credential.key_id)?
    };

    let recipients = ctx.public_keys(&args.seal.keys)?;
    debug!(recipients = recipients.len(), "loaded public keys");

    let store = ctx.store(args.seal.repo.as_deref());
    let saved = vault::save(
        &store,
        &Git,
        &SaveRequest {
            credential: &credential,
            claims: claims.clone(),
            lifetime: resolve::clamp_lifetime(args.seal.lifetime),
            recipients: &recipients,
        },
    )?;

    output::success(&format!(
        "saved credentials for {}@{} to {}",
        claims.identity,
        claims.alias,
        output::path(&saved.path.display().to_string())
    ));
    if let Some(commit) = saved.commit {
        debug!(%commit, "committed");
    }
    Ok(())
}
