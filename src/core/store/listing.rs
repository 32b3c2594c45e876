//! Pure selection rules over directory listings.
//!
//! Kept free of I/O so the default-directory and latest-file rules can be
//! tested against any listing.

use crate::core::constants::ENVELOPE_EXTENSION;
use crate::core::types::EnvelopeName;
use crate::error::{Result, StoreError};

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Control directories such as `.git` are never aliases or identities.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Directory entries only, skipping control directories.
pub fn subdirectories(listing: &[Entry]) -> Vec<&Entry> {
    listing
        .iter()
        .filter(|entry| entry.is_dir && !entry.is_hidden())
        .collect()
}

/// The sole subdirectory, when there is exactly one.
///
/// `location` only feeds the error message.
pub fn find_default_directory(listing: &[Entry], location: &str) -> Result<String> {
    let dirs = subdirectories(listing);
    match dirs.as_slice() {
        [] => Err(StoreError::NoCredentials(location.to_string()).into()),
        [only] => Ok(only.name.clone()),
        _ => Err(StoreError::Ambiguous {
            what: "account or user".to_string(),
            path: location.to_string(),
        }
        .into()),
    }
}

/// The lexicographically last file name.
///
/// Names start with a decimal epoch, so string order is chronological for
/// equal digit counts. No numeric parsing happens here.
pub fn latest_envelope(listing: &[Entry], identity: &str, alias: &str) -> Result<EnvelopeName> {
    listing
        .iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| &entry.name)
        .max()
        .cloned()
        .ok_or_else(|| {
            StoreError::NothingSaved {
                identity: identity.to_string(),
                alias: alias.to_string(),
            }
            .into()
        })
}

/// `<epoch>-<key id suffix>.json`.
pub fn envelope_file_name(epoch: i64, key_id: &str) -> EnvelopeName {
    format!("{}-{}.{}", epoch, key_id_suffix(key_id), ENVELOPE_EXTENSION)
}

/// Everything after the 12th character of a key id; at least the last four.
fn key_id_suffix(key_id: &str) -> &str {
    let chars: Vec<(usize, char)> = key_id.char_indices().collect();
    let start = if chars.len() >= 16 {
        12
    } else {
        chars.len().saturating_sub(4)
    };
    chars
        .get(start)
        .map(|(offset, _)| &key_id[*offset..])
        .unwrap_or(key_id)
}
