//! Versioned credential store.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/<alias>/<identity>/<epoch>-<key id suffix>.json
//! ```
//!
//! Envelope files are immutable: a save always creates a new file and never
//! replaces or removes an older one.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::core::envelope::Envelope;
use crate::error::{PersistError, Result, StoreError};

mod listing;

pub use listing::{
    envelope_file_name, find_default_directory, latest_envelope, subdirectories, Entry,
};

/// Read a directory into a name-sorted listing.
///
/// A missing directory reads as empty.
pub fn read_listing(path: &Path) -> Result<Vec<Entry>> {
    let reader = match fs::read_dir(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(read_failed(path, source)),
    };

    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|source| read_failed(path, source))?;
        let is_dir = entry
            .file_type()
            .map_err(|source| read_failed(path, source))?
            .is_dir();
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort();

    trace!(path = %path.display(), entries = entries.len(), "read listing");
    Ok(entries)
}

fn read_failed(path: &Path, source: std::io::Error) -> crate::error::Error {
    StoreError::ReadFailed {
        path: path.display().to_string(),
        source,
    }
    .into()
}

/// A credential store rooted at one directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every envelope for `identity@alias`.
    pub fn identity_dir(&self, alias: &str, identity: &str) -> PathBuf {
        self.root.join(alias).join(identity)
    }

    /// The only alias in the store.
    pub fn default_alias(&self) -> Result<String> {
        let listing = read_listing(&self.root)?;
        find_default_directory(&listing, &self.root.display().to_string())
    }

    /// The only identity saved under `alias`.
    pub fn default_identity(&self, alias: &str) -> Result<String> {
        let dir = self.root.join(alias);
        let listing = read_listing(&dir)?;
        find_default_directory(&listing, &dir.display().to_string())
    }

    /// Full path of the newest envelope for `identity@alias`.
    pub fn latest(&self, alias: &str, identity: &str) -> Result<PathBuf> {
        let dir = self.identity_dir(alias, identity);
        let name = latest_envelope(&read_listing(&dir)?, identity, alias)?;
        debug!(path = %dir.join(&name).display(), "latest envelope");
        Ok(dir.join(name))
    }

    /// Every `identity@alias` with at least one envelope, sorted.
    pub fn list_all(&self) -> Result<Vec<String>> {
        let root_listing = read_listing(&self.root)?;
        let aliases = subdirectories(&root_listing);
        if aliases.is_empty() {
            return Err(StoreError::NoCredentials(self.root.display().to_string()).into());
        }

        let mut found = BTreeSet::new();
        for alias in aliases {
            let alias_listing = read_listing(&self.root.join(&alias.name))?;
            for identity in subdirectories(&alias_listing) {
                let files = read_listing(&self.identity_dir(&alias.name, &identity.name))?;
                if files.iter().any(|entry| !entry.is_dir) {
                    found.insert(format!("{}@{}", identity.name, alias.name));
                }
            }
        }

        Ok(found.into_iter().collect())
    }

    /// Write `envelope` as a new file and return its path relative to the root.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::AlreadyExists` if the target file is present;
    /// existing envelopes are never overwritten. A failed write removes the
    /// partial file, leaving the directory as it was.
    pub fn save(&self, envelope: &Envelope, key_id: &str) -> Result<PathBuf> {
        let epoch: i64 = envelope
            .create_time
            .parse()
            .map_err(|_| PersistError::InvalidCreateTime(envelope.create_time.clone()))?;
        let name = envelope_file_name(epoch, key_id);
        let relative = Path::new(&envelope.alias)
            .join(&envelope.identity)
            .join(&name);
        let dir = self.identity_dir(&envelope.alias, &envelope.identity);

        create_private_dir(&dir)?;

        let path = dir.join(&name);
        let contents = envelope.to_json()?;
        let file = open_new(&path)?;
        write_or_remove(&path, file, contents.as_bytes())?;

        debug!(path = %path.display(), "saved envelope");
        Ok(relative)
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(dir)
            .map_err(|source| write_failed(dir, source))?;
    }
    #[cfg(not(unix))]
    fs::create_dir_all(dir).map_err(|source| write_failed(dir, source))?;
    Ok(())
}

fn open_new(path: &Path) -> Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path).map_err(|source| {
        if source.kind() == ErrorKind::AlreadyExists {
            PersistError::AlreadyExists(path.display().to_string()).into()
        } else {
            write_failed(path, source)
        }
    })
}

/// Fill a freshly created file, deleting it again if the write fails.
fn write_or_remove(path: &Path, mut file: impl Write, contents: &[u8]) -> Result<()> {
    let Err(source) = file.write_all(contents).and_then(|()| file.flush()) else {
        return Ok(());
    };
    drop(file);
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove partial envelope");
    }
    Err(write_failed(path, source))
}

fn write_failed(path: &Path, source: std::io::Error) -> crate::error::Error {
    PersistError::WriteFailed {
        path: path.display().to_string(),
        source,
    }
    .into()
}
