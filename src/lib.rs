//! Credulous - secure storage and rotation of cloud credentials.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── save          # Encrypt and store environment credentials
//! │   ├── source        # Decrypt, validate and print exports
//! │   ├── list          # Saved username@account pairs
//! │   ├── rotate        # Replace the oldest access key
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Hybrid RSA-OAEP + AES-CFB, fingerprints, key loading
//!     ├── envelope/     # On-disk document and format versions
//!     ├── store/        # <root>/<alias>/<identity>/<epoch>-<key>.json
//!     ├── provider/     # Identity provider capabilities (AWS IAM)
//!     ├── changelog/    # Git commits for managed stores
//!     ├── rotation      # Access key rotation
//!     ├── validation    # Identity claim checks
//!     └── vault         # Save and retrieve pipelines
//! ```
//!
//! # Features
//!
//! - Every credential encrypted separately for each recipient's SSH key
//! - Immutable, versioned envelope files
//! - Optional git history of every save
//! - Access key rotation against AWS IAM (feature `aws`)

pub mod cli;
pub mod core;
pub mod error;
