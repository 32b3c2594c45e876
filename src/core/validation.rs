//! Identity claim validation.
//!
//! A decrypted envelope names the identity and account it was saved for.
//! Before its credential is handed out, those claims are checked against
//! what was requested and against the live identity provider.

use tracing::debug;

use crate::core::envelope::Envelope;
use crate::core::provider::{AliasGetter, IdentityGetter};
use crate::error::{Result, ValidationError};

/// Check `envelope` against the request and the provider.
///
/// The account-level (root) identity has no login name of its own; it is
/// saved with `identity == alias` and verified against an empty name.
///
/// # Errors
///
/// Returns a `ValidationError` describing the first claim that fails.
/// Provider errors surface unchanged.
pub fn validate<P>(
    envelope: &Envelope,
    requested_alias: &str,
    requested_identity: &str,
    provider: &P,
) -> Result<()>
where
    P: IdentityGetter + AliasGetter + ?Sized,
{
    if envelope.identity != requested_identity {
        return Err(ValidationError::UsernameMismatch {
            found: envelope.identity.clone(),
            requested: requested_identity.to_string(),
        }
        .into());
    }
    if envelope.alias != requested_alias {
        return Err(ValidationError::AccountMismatch {
            found: envelope.alias.clone(),
            requested: requested_alias.to_string(),
        }
        .into());
    }

    verify_account(provider, &envelope.alias)?;

    if envelope.identity == envelope.alias {
        verify_user(provider, "")
    } else {
        verify_user(provider, &envelope.identity)
    }
}

/// The provider's current alias must equal `alias`.
pub fn verify_account<P: AliasGetter + ?Sized>(provider: &P, alias: &str) -> Result<()> {
    let current = provider.current_alias()?;
    debug!(expected = alias, current = %current, "verifying account");
    if current == alias {
        Ok(())
    } else {
        Err(ValidationError::CannotVerifyAccount(alias.to_string()).into())
    }
}

/// The provider's current identity must equal `identity`.
pub fn verify_user<P: IdentityGetter + ?Sized>(provider: &P, identity: &str) -> Result<()> {
    let current = provider.current_identity()?;
    debug!(expected = identity, current = %current, "verifying user");
    if current == identity {
        Ok(())
    } else {
        Err(ValidationError::CannotVerifyUser(identity.to_string()).into())
    }
}
