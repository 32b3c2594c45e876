//! Credulous - secure storage and rotation of cloud credentials.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credulous::cli::output;
use credulous::cli::{execute, Cli};
use credulous::core::constants::ENV_LOG;
use credulous::error::{ConfigError, Error, ProviderError, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credulous=debug")
        } else {
            EnvFilter::new("credulous=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Store(StoreError::NoCredentials(_))
            | Error::Store(StoreError::NothingSaved { .. }) => Some("run: credulous save"),
            Error::Store(StoreError::Ambiguous { .. }) => {
                Some("specify one: credulous source <username>@<account>")
            }
            Error::Config(ConfigError::MissingCredentials) => {
                Some("export AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY first")
            }
            Error::Provider(ProviderError::Unavailable(_)) => {
                Some("pass --force, or rebuild with: cargo install credulous --features aws")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
