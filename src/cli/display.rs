//! Display command.

use crate::core::constants::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};
use crate::error::Result;

/// Print the AWS key pair currently in the environment.
pub fn execute() -> Result<()> {
    for name in [ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY] {
        println!("{}: {}", name, std::env::var(name).unwrap_or_default());
    }
    Ok(())
}
