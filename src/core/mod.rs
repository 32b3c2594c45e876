//! Core library components.
//!
//! Everything except argument parsing and terminal output: envelope
//! cryptography, the on-disk store, rotation and validation, plus the
//! provider and change-log capabilities they are built on.

pub mod changelog;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod envelope;
pub mod prompt;
pub mod provider;
pub mod rotation;
pub mod store;
pub mod types;
pub mod validation;
pub mod vault;
