//! In-memory transport for tests.
//!
//! Records every call and tracks the last committed content per path, so
//! `status` behaves like git's index: staging unchanged content leaves it
//! clean, and commits whose push failed leave it ahead.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::Transport;
use crate::core::domain::{Checkout, Status};
use crate::error::{SyncError, SyncStep};

/// A recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CloneOrOpen(String, PathBuf),
    FetchAndRebase(PathBuf),
    Stage(String),
    Status,
    Commit(String),
    Push,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    committed: HashMap<String, Option<Vec<u8>>>,
    staged: HashMap<String, Option<Vec<u8>>>,
    commits: Vec<String>,
    unpushed: usize,
    pushes: usize,
}

/// Recording fake of [`Transport`].
#[derive(Debug, Default)]
pub struct Memory {
    state: RefCell<State>,
    fail_at: Option<SyncStep>,
    fail_once: Cell<Option<SyncStep>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with a `SyncError` when `step` runs.
    pub fn failing(mut self, step: SyncStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Fail only the first time `step` runs.
    pub fn failing_once(self, step: SyncStep) -> Self {
        self.fail_once.set(Some(step));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn commits(&self) -> Vec<String> {
        self.state.borrow().commits.clone()
    }

    pub fn pushes(&self) -> usize {
        self.state.borrow().pushes
    }

    fn record(&self, call: Call, step: SyncStep) -> Result<(), SyncError> {
        self.state.borrow_mut().calls.push(call);
        let once = self.fail_once.get() == Some(step);
        if once {
            self.fail_once.set(None);
        }
        if once || self.fail_at == Some(step) {
            return Err(SyncError::Failed {
                step,
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Transport for Memory {
    fn clone_or_open(&self, remote: &str, local: &Path) -> Result<Checkout, SyncError> {
        self.record(
            Call::CloneOrOpen(remote.to_string(), local.to_path_buf()),
            SyncStep::Clone,
        )?;
        if local.is_dir() {
            return Ok(Checkout::Existing(local.to_path_buf()));
        }
        fs::create_dir_all(local).map_err(|source| SyncError::Checkout {
            path: local.to_path_buf(),
            source,
        })?;
        Ok(Checkout::Cloned(local.to_path_buf()))
    }

    fn fetch_and_rebase(&self, local: &Path) -> Result<(), SyncError> {
        self.record(Call::FetchAndRebase(local.to_path_buf()), SyncStep::Pull)
    }

    fn stage(&self, local: &Path, path: &str) -> Result<(), SyncError> {
        self.record(Call::Stage(path.to_string()), SyncStep::Add)?;

        let content = fs::read(local.join(path)).ok();
        let mut state = self.state.borrow_mut();
        let committed = state.committed.get(path).cloned().flatten();
        if content == committed {
            state.staged.remove(path);
        } else {
            state.staged.insert(path.to_string(), content);
        }
        Ok(())
    }

    fn status(&self, _local: &Path) -> Result<Status, SyncError> {
        self.record(Call::Status, SyncStep::Status)?;
        let state = self.state.borrow();
        if !state.staged.is_empty() {
            Ok(Status::Dirty)
        } else if state.unpushed > 0 {
            Ok(Status::Ahead)
        } else {
            Ok(Status::Clean)
        }
    }

    fn commit(&self, _local: &Path, message: &str) -> Result<(), SyncError> {
        self.record(Call::Commit(message.to_string()), SyncStep::Commit)?;
        let mut state = self.state.borrow_mut();
        let staged: Vec<_> = state.staged.drain().collect();
        state.committed.extend(staged);
        state.commits.push(message.to_string());
        state.unpushed += 1;
        Ok(())
    }

    fn push(&self, _local: &Path) -> Result<(), SyncError> {
        self.record(Call::Push, SyncStep::Push)?;
        let mut state = self.state.borrow_mut();
        state.unpushed = 0;
        state.pushes += 1;
        Ok(())
    }
}
