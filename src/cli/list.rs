//! List command.

use crate::cli::resolve::Context;
use crate::error::Result;

/// Print every saved `username@account`, one per line.
pub fn execute(repo: Option<&str>) -> Result<()> {
    let ctx = Context::load()?;
    for entry in ctx.store(repo).list_all()? {
        println!("{}", entry);
    }
    Ok(())
}
