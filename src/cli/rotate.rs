//! Rotate command.
//!
//! Retires one access key of the current identity, creates its replacement
//! and saves the new key pair as a fresh envelope.

use crate::cli::resolve::{self, Context};
use crate::cli::{output, RotateArgs};
use crate::core::changelog::Git;
use crate::core::domain::PlaintextCredential;
use crate::core::provider::{self, AliasGetter, IdentityGetter};
use crate::core::rotation;
use crate::core::vault::{self, Claims, SaveRequest};
use crate::error::{ProviderError, Result};

/// Execute the rotate command.
pub fn execute(args: RotateArgs) -> Result<()> {
    let ctx = Context::load()?;
    // Unreadable public keys must fail before any key is deleted.
    let recipients = ctx.public_keys(&args.seal.keys)?;

    let provider = provider::default_provider()?;
    let identity = provider.current_identity()?;
    let alias = provider.current_alias()?;

    let created = rotation::rotate(provider.as_ref(), &identity)?;
    let secret = created.secret.clone().ok_or_else(|| {
        ProviderError::Request(format!("no secret returned for {}", created.key_id))
    })?;
    output::success(&format!("created access key {}", created.key_id));

    let credential = PlaintextCredential::new(created.key_id.as_str(), secret.as_str())
        .with_env_vars(resolve::parse_env_args(&args.seal.env));
    let claims = Claims {
        identity,
        alias,
        create_time: created.created.timestamp(),
    };

    let store = ctx.store(args.seal.repo.as_deref());
    let saved = vault::save(
        &store,
        &Git,
        &SaveRequest {
            credential: &credential,
            claims,
            lifetime: resolve::clamp_lifetime(args.seal.lifetime),
            recipients: &recipients,
        },
    )?;

    output::success(&format!(
        "saved new credentials to {}",
        output::path(&saved.path.display().to_string())
    ));
    output::hint("run: eval $(credulous source) to load them");
    Ok(())
}
