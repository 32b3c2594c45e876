//! Constants used throughout credulous.
//!
//! Centralizes magic strings and configuration values.

/// Current envelope format (hybrid RSA-OAEP + AES-CFB).
pub const FORMAT_VERSION: &str = "2014-06-12";

/// Legacy envelope format (RSA-OAEP only, short plaintexts).
pub const LEGACY_FORMAT_VERSION: &str = "2014-05-31";

/// OAEP label binding ciphertexts to this application.
pub const OAEP_LABEL: &str = "Credulous";

/// Random bytes in a legacy salt (before base64).
pub const SALT_LENGTH: usize = 8;

/// Root directory relative to HOME (~/.credulous).
pub const ROOT_DIR: &str = ".credulous";

/// Repository name used when `--repo local` (the default) is given.
pub const LOCAL_REPO: &str = "local";

/// Config file name inside the root directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default private key relative to HOME.
pub const DEFAULT_PRIVATE_KEY: &str = ".ssh/id_rsa";

/// Default public key relative to HOME.
pub const DEFAULT_PUBLIC_KEY: &str = ".ssh/id_rsa.pub";

/// Envelope file extension.
pub const ENVELOPE_EXTENSION: &str = "json";

/// Commit message for saved envelopes.
pub const COMMIT_MESSAGE: &str = "Added by Credulous";

/// Environment variable carrying the access key id to save.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable carrying the secret access key to save.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Store root override.
pub const ENV_REPO: &str = "CREDULOUS_REPO";

/// Private key path override.
pub const ENV_PRIVATE_KEY: &str = "CREDULOUS_PRIVATE_KEY";

/// Log filter override.
pub const ENV_LOG: &str = "CREDULOUS_LOG";
