//! Change-log capabilities.
//!
//! A store root may additionally be tracked by version control. Saving into
//! a managed root commits the new envelope; an unmanaged root is not an
//! error.

use std::path::Path;

use crate::error::Result;

mod git;

pub use git::Git;

/// Whether a store root is tracked by a change-log.
pub trait StoreDetector {
    fn is_managed(&self, root: &Path) -> Result<bool>;
}

/// Record one new file in the change-log.
pub trait Persister {
    /// Commit `relative` (a path under `root`) and return the commit id.
    fn commit(
        &self,
        root: &Path,
        relative: &Path,
        message: &str,
        author: &str,
    ) -> Result<String>;
}

/// Both halves of a change-log backend.
pub trait ChangeLog: StoreDetector + Persister {}

impl<T: StoreDetector + Persister> ChangeLog for T {}
