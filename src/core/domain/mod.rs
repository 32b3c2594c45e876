//! Domain types.

mod access_key;
mod credential;

pub use access_key::{AccessKey, KeyStatus};
pub use credential::PlaintextCredential;
