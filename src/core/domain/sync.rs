//! Sync outcome types.

use std::path::PathBuf;

/// Result of publishing a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    /// Nothing differed from the last published state; no commit, no push.
    Unchanged,
    /// The change, or an earlier commit the remote never received, was pushed.
    Pushed,
}

impl Published {
    /// Whether a commit was pushed.
    pub fn was_pushed(&self) -> bool {
        matches!(self, Self::Pushed)
    }
}

/// How a local checkout was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkout {
    /// A fresh clone was just created.
    Cloned(PathBuf),
    /// A clone already existed and still needs updating.
    Existing(PathBuf),
}

/// Staged state of a working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Index matches the last commit.
    Clean,
    /// Staged changes are waiting to be committed.
    Dirty,
    /// Nothing staged, but local commits have not reached the remote.
    Ahead,
}
