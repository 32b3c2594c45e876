//! Source command.
//!
//! Prints `export` lines for the newest saved credentials, for use as
//! `eval $(credulous source)`.

use crate::cli::resolve::{self, Context};
use crate::cli::SourceArgs;
use crate::core::cipher::PrivateKey;
use crate::core::prompt::TerminalPrompt;
use crate::core::provider;
use crate::core::vault;
use crate::error::Result;

/// Account and user, from `USER@ACCOUNT`, `-c`, or `-a`/`-u`.
fn target(args: &SourceArgs) -> Result<(Option<String>, Option<String>)> {
    if let Some(target) = args.target.as_deref().or(args.credentials.as_deref()) {
        let (account, user) = resolve::split_user_and_account(target)?;
        return Ok((Some(account), Some(user)));
    }
    Ok((args.account.clone(), args.username.clone()))
}

/// Execute the source command.
pub fn execute(args: SourceArgs) -> Result<()> {
    let ctx = Context::load()?;
    let (account, user) = target(&args)?;

    let key = PrivateKey::load(&ctx.private_key(args.key.as_deref()), &TerminalPrompt)?;
    let store = ctx.store(args.repo.as_deref());

    let retrieved = if args.force {
        vault::retrieve(&store, &key, account.as_deref(), user.as_deref())?
    } else {
        let provider = provider::default_provider()?;
        vault::retrieve_validated(
            &store,
            &key,
            account.as_deref(),
            user.as_deref(),
            provider.as_ref(),
        )?
    };

    for line in retrieved.credential()?.export_lines() {
        println!("{}", line);
    }
    Ok(())
}
