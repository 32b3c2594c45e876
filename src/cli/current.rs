//! Current command.

use crate::core::provider::{self, AliasGetter, IdentityGetter};
use crate::error::Result;

/// Print the provider's view of the loaded credentials as `username@alias`.
pub fn execute() -> Result<()> {
    let provider = provider::default_provider()?;
    let identity = provider.current_identity()?;
    let alias = provider.current_alias()?;
    println!("{}@{}", identity, alias);
    Ok(())
}
