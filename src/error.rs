//! Error types.
//!
//! Each subsystem owns a focused error enum; [`Error`] wraps them all so the
//! binary can render one message and pick a hint from the variant.

use thiserror::Error;

/// Top-level error for all credulous operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure classification shared by every error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing saved, no matching recipient, or no access keys.
    NotFound,
    /// More than one candidate where exactly one was needed.
    Ambiguous,
    /// Identity or alias claims do not check out.
    ValidationFailed,
    /// Encryption, decryption or key parsing failed.
    CryptoFailure,
    /// The identity provider returned an error.
    ProviderFailure,
    /// Writing an envelope or committing it failed.
    PersistenceFailure,
    /// Rotation refused to pick a key to retire.
    RotationRefused,
    /// Bad arguments or configuration.
    Usage,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Cipher(_) => ErrorKind::CryptoFailure,
            Self::Store(e) => match e {
                StoreError::Ambiguous { .. } => ErrorKind::Ambiguous,
                StoreError::ReadFailed { .. } => ErrorKind::PersistenceFailure,
                _ => ErrorKind::NotFound,
            },
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Provider(_) => ErrorKind::ProviderFailure,
            Self::Rotation(e) => match e {
                RotationError::NoKeys(_) => ErrorKind::NotFound,
                _ => ErrorKind::RotationRefused,
            },
            Self::Persist(_) => ErrorKind::PersistenceFailure,
            Self::Config(_) => ErrorKind::Usage,
            Self::Io(_) => ErrorKind::PersistenceFailure,
            Self::Json(_) => ErrorKind::CryptoFailure,
        }
    }
}

/// Cryptographic failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("cannot parse private key {name}: {reason}")]
    InvalidPrivateKey { name: String, reason: String },

    #[error("unsupported PEM encryption: {0}")]
    UnsupportedPemCipher(String),

    #[error("unsupported credential format version: {0}")]
    UnsupportedFormat(String),

    #[error("passphrase prompt failed: {0}")]
    Prompt(String),
}

/// Credential store lookups.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no saved credentials found in {0}")]
    NoCredentials(String),

    #[error("more than one {what} found in {path}; please specify it explicitly")]
    Ambiguous { what: String, path: String },

    #[error("no credentials have been saved for {identity}@{alias}")]
    NothingSaved { identity: String, alias: String },

    #[error("the key {0} cannot decrypt those credentials")]
    NoMatchingRecipient(String),

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Identity claims that do not match.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("username in credential ({found}) does not match requested username ({requested})")]
    UsernameMismatch { found: String, requested: String },

    #[error("account alias in credential ({found}) does not match requested alias ({requested})")]
    AccountMismatch { found: String, requested: String },

    #[error("cannot verify account, does not match alias: {0}")]
    CannotVerifyAccount(String),

    #[error("cannot verify user, does not match access keys: {0}")]
    CannotVerifyUser(String),
}

/// Identity provider failures.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("identity provider request failed: {0}")]
    Request(String),

    #[error("cannot find access key {key_id} for {identity}")]
    KeyNotFound { identity: String, key_id: String },

    #[error("identity provider not available: {0}")]
    Unavailable(String),
}

/// Access key rotation refusals.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("cannot find any access key for {0}")]
    NoKeys(String),

    #[error("only one key in the account; cannot rotate")]
    OnlyOneKey,

    #[error("cannot find oldest key for this account, will not rotate")]
    NoVictim,
}

/// Envelope persistence and change-log failures.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid envelope create time: {0}")]
    InvalidCreateTime(String),

    #[error("git executable not found")]
    GitNotFound,

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },
}

/// Argument and configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unable to determine home directory")]
    NoHome,

    #[error("can't save, no credentials in the environment")]
    MissingCredentials,

    #[error("invalid account format; please specify <username>@<account>")]
    InvalidAccountFormat,

    #[error("{0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, Error>;
