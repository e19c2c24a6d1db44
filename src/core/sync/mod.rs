//! Repository synchronization.
//!
//! The remote is the source of truth. Before any read or write the local
//! checkout is cloned or rebased onto the remote tip; after a mutation
//! exactly one path is staged, and only a real difference is committed and
//! pushed. Local commits an earlier failed push left behind are pushed by the
//! next publish, even when the change itself is already committed. Conflicts are never resolved here: a failed rebase or a rejected
//! push surfaces as a `SyncError` naming the git step, and the checkout is
//! left as git left it.
//!
//! ```text
//! prepare:  clone | pull --rebase
//! publish:  add -> status -> (clean: done) | (ahead: push) | (dirty: commit -> push)
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::domain::{Checkout, Published, Status};
use crate::error::SyncError;

mod git;
#[cfg(test)]
pub(crate) mod memory;

pub use git::Git;

/// Version-control operations the sync controller relies on.
///
/// Implemented by [`Git`] for real repositories; tests substitute a fake.
pub trait Transport {
    /// Clone `remote` into `local` unless a clone is already there.
    fn clone_or_open(&self, remote: &str, local: &Path) -> Result<Checkout, SyncError>;

    /// Fetch and rebase local commits onto the remote tip.
    fn fetch_and_rebase(&self, local: &Path) -> Result<(), SyncError>;

    /// Stage one path (relative, `/`-separated), including its deletion.
    fn stage(&self, local: &Path, path: &str) -> Result<(), SyncError>;

    /// Whether anything is staged or waiting to be pushed.
    fn status(&self, local: &Path) -> Result<Status, SyncError>;

    /// Commit what is staged.
    fn commit(&self, local: &Path, message: &str) -> Result<(), SyncError>;

    /// Push to the remote.
    fn push(&self, local: &Path) -> Result<(), SyncError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn clone_or_open(&self, remote: &str, local: &Path) -> Result<Checkout, SyncError> {
        (**self).clone_or_open(remote, local)
    }

    fn fetch_and_rebase(&self, local: &Path) -> Result<(), SyncError> {
        (**self).fetch_and_rebase(local)
    }

    fn stage(&self, local: &Path, path: &str) -> Result<(), SyncError> {
        (**self).stage(local, path)
    }

    fn status(&self, local: &Path) -> Result<Status, SyncError> {
        (**self).status(local)
    }

    fn commit(&self, local: &Path, message: &str) -> Result<(), SyncError> {
        (**self).commit(local, message)
    }

    fn push(&self, local: &Path) -> Result<(), SyncError> {
        (**self).push(local)
    }
}

/// A local checkout kept in step with its remote.
#[derive(Debug)]
pub struct Repository<T> {
    transport: T,
    dir: PathBuf,
}

impl<T: Transport> Repository<T> {
    /// Materialize an up-to-date checkout of `remote` at `checkout`.
    ///
    /// A fresh clone is used as-is; an existing one is rebased onto the
    /// remote tip.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if cloning fails, the remote is unreachable, or the
    /// rebase cannot complete cleanly.
    pub fn prepare(transport: T, remote: &str, checkout: &Path) -> Result<Self, SyncError> {
        debug!(remote, checkout = %checkout.display(), "preparing checkout");

        let dir = match transport.clone_or_open(remote, checkout)? {
            Checkout::Cloned(dir) => {
                info!(dir = %dir.display(), "cloned secret store");
                dir
            }
            Checkout::Existing(dir) => {
                transport.fetch_and_rebase(&dir)?;
                debug!(dir = %dir.display(), "updated secret store");
                dir
            }
        };

        Ok(Self { transport, dir })
    }

    /// Use a directory that is already materialized, without touching the
    /// remote.
    pub fn open(transport: T, dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            dir: dir.into(),
        }
    }

    /// Local checkout path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stage `path`, then commit and push it if it differs from the last
    /// published state. Commits that never reached the remote are pushed even
    /// when `path` itself has nothing new.
    ///
    /// Stops at the first failing step; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` naming the failed step.
    pub fn publish(&self, path: &str, message: &str) -> Result<Published, SyncError> {
        self.transport.stage(&self.dir, path)?;

        match self.transport.status(&self.dir)? {
            Status::Clean => {
                debug!(path, "nothing to publish");
                return Ok(Published::Unchanged);
            }
            Status::Ahead => debug!(path, "pushing unpublished commits"),
            Status::Dirty => self.transport.commit(&self.dir, message)?,
        }

        self.transport.push(&self.dir)?;
        info!(path, message, "published");

        Ok(Published::Pushed)
    }
}
