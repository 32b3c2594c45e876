//! Command-line interface.

pub mod completions;
pub mod current;
pub mod display;
pub mod list;
pub mod output;
pub mod resolve;
pub mod rotate;
pub mod save;
pub mod source;

use clap::{Args, Parser, Subcommand};

use crate::core::constants::{ENV_PRIVATE_KEY, ENV_REPO};
use crate::error::Result;

/// Credulous - secure cloud credential storage and rotation.
#[derive(Parser)]
#[command(
    name = "credulous",
    about = "Secure storage and rotation of AWS credentials",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt the AWS credentials in the environment and save them
    Save(SaveArgs),

    /// Decrypt saved credentials and print them as shell exports
    Source(SourceArgs),

    /// List every saved username@account
    List {
        /// Repository location ('local' by default)
        #[arg(short, long, env = ENV_REPO)]
        repo: Option<String>,
    },

    /// Show the username and alias of the currently-loaded credentials
    Current,

    /// Display the AWS credentials in the environment
    Display,

    /// Rotate the current AWS access key, deleting the oldest, and save the new one
    Rotate(RotateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by commands that write envelopes.
#[derive(Args, Debug)]
pub struct SealArgs {
    /// SSH public keys to encrypt for (repeatable)
    #[arg(short, long = "key", value_name = "PUBKEY")]
    pub keys: Vec<String>,

    /// Extra environment variables, as NAME=value (repeatable)
    #[arg(short, long = "env", value_name = "NAME=value")]
    pub env: Vec<String>,

    /// Credential lifetime in seconds (0 means forever)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub lifetime: i64,

    /// Repository location ('local' by default)
    #[arg(short, long, env = ENV_REPO)]
    pub repo: Option<String>,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub seal: SealArgs,

    /// Save without asking AWS who the credentials belong to
    #[arg(short, long)]
    pub force: bool,

    /// IAM username (only with --force)
    #[arg(short, long)]
    pub username: Option<String>,

    /// AWS account alias or id (only with --force)
    #[arg(short, long)]
    pub account: Option<String>,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Credentials to load, as username@account
    #[arg(value_name = "USER@ACCOUNT")]
    pub target: Option<String>,

    /// AWS account alias or id
    #[arg(short, long)]
    pub account: Option<String>,

    /// IAM username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Credentials, for example username@account
    #[arg(short, long)]
    pub credentials: Option<String>,

    /// SSH private key
    #[arg(short, long, env = ENV_PRIVATE_KEY, value_name = "PRIVKEY")]
    pub key: Option<String>,

    /// Skip validating username and account against AWS
    #[arg(short, long)]
    pub force: bool,

    /// Repository location ('local' by default)
    #[arg(short, long, env = ENV_REPO)]
    pub repo: Option<String>,
}

#[derive(Args, Debug)]
pub struct RotateArgs {
    #[command(flatten)]
    pub seal: SealArgs,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a CLI command.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Save(args) => save::execute(args),
        Command::Source(args) => source::execute(args),
        Command::List { repo } => list::execute(repo.as_deref()),
        Command::Current => current::execute(),
        Command::Display => display::execute(),
        Command::Rotate(args) => rotate::execute(args),
        Command::Completions { shell } => completions::execute(shell),
    }
}
