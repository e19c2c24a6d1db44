//! Git transport.
//!
//! Runs the git CLI against the local checkout with `-C <dir>`. Any non-zero
//! exit becomes a `SyncError::Failed` carrying git's stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, trace};

use super::Transport;
use crate::core::domain::{Checkout, Status};
use crate::error::{SyncError, SyncStep};

/// Transport backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Git {
    /// Use the git binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn output(&self, step: SyncStep, dir: Option<&Path>, args: &[&str]) -> Result<Output, SyncError> {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = dir {
            cmd.arg("-C").arg(dir);
        }
        cmd.args(args);

        debug!(%step, ?args, "running git");
        cmd.output().map_err(|source| SyncError::Spawn { step, source })
    }

    fn run(&self, step: SyncStep, dir: Option<&Path>, args: &[&str]) -> Result<String, SyncError> {
        let output = self.output(step, dir, args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            };
            return Err(SyncError::Failed { step, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!(%step, stdout_len = stdout.len(), "git finished");
        Ok(stdout)
    }

    /// Like `run`, but a non-zero exit is an answer (`None`), not an error.
    fn query(&self, step: SyncStep, dir: &Path, args: &[&str]) -> Result<Option<String>, SyncError> {
        let output = self.output(step, Some(dir), args)?;
        Ok(output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }
}

/// Whether the URL a checkout was cloned from names `remote`.
///
/// git records local clone sources as absolute paths, so paths are compared
/// after canonicalizing.
fn same_remote(configured: &str, remote: &str) -> bool {
    if configured == remote {
        return true;
    }
    match (fs::canonicalize(configured), fs::canonicalize(remote)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Transport for Git {
    fn clone_or_open(&self, remote: &str, local: &Path) -> Result<Checkout, SyncError> {
        if local.join(".git").exists() {
            // Raw config value, so `insteadOf` rewrites do not cause a mismatch.
            let found = self
                .query(SyncStep::Clone, local, &["config", "--get", "remote.origin.url"])?
                .unwrap_or_default();
            if !same_remote(&found, remote) {
                return Err(SyncError::ForeignCheckout {
                    path: local.to_path_buf(),
                    expected: remote.to_string(),
                    found,
                });
            }
            return Ok(Checkout::Existing(local.to_path_buf()));
        }

        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent).map_err(|source| SyncError::Checkout {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let target = local.to_string_lossy();
        self.run(SyncStep::Clone, None, &["clone", "--", remote, &*target])?;
        Ok(Checkout::Cloned(local.to_path_buf()))
    }

    fn fetch_and_rebase(&self, local: &Path) -> Result<(), SyncError> {
        // A store nobody has written to yet has no branch to rebase onto.
        let heads = self.run(SyncStep::Pull, Some(local), &["ls-remote", "--heads", "origin"])?;
        if heads.trim().is_empty() {
            debug!(dir = %local.display(), "remote has no branches yet");
            return Ok(());
        }

        self.run(SyncStep::Pull, Some(local), &["pull", "--rebase"])?;
        Ok(())
    }

    fn stage(&self, local: &Path, path: &str) -> Result<(), SyncError> {
        // `git add` rejects a pathspec that matches nothing, so a removal is
        // staged through the index directly.
        if local.join(path).exists() {
            self.run(SyncStep::Add, Some(local), &["add", "--", path])?;
        } else {
            self.run(
                SyncStep::Add,
                Some(local),
                &["rm", "-r", "--cached", "--ignore-unmatch", "--quiet", "--", path],
            )?;
        }
        Ok(())
    }

    fn status(&self, local: &Path) -> Result<Status, SyncError> {
        let staged = self.run(
            SyncStep::Status,
            Some(local),
            &["diff", "--cached", "--name-only"],
        )?;
        if !staged.trim().is_empty() {
            return Ok(Status::Dirty);
        }

        // An unborn branch has no commits to push.
        let head = self.query(SyncStep::Status, local, &["rev-parse", "--verify", "--quiet", "HEAD"])?;
        if head.is_none() {
            return Ok(Status::Clean);
        }

        let unpushed = self.run(
            SyncStep::Status,
            Some(local),
            &["rev-list", "--count", "HEAD", "--not", "--remotes"],
        )?;
        if unpushed.trim() == "0" {
            Ok(Status::Clean)
        } else {
            Ok(Status::Ahead)
        }
    }

    fn commit(&self, local: &Path, message: &str) -> Result<(), SyncError> {
        self.run(SyncStep::Commit, Some(local), &["commit", "--quiet", "-m", message])?;
        Ok(())
    }

    fn push(&self, local: &Path) -> Result<(), SyncError> {
        // Explicit refspec: the first push to an empty remote creates the branch.
        self.run(SyncStep::Push, Some(local), &["push", "--quiet", "origin", "HEAD"])?;
        Ok(())
    }
}
