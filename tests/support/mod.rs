//! Test support utilities for cellar integration tests.
//!
//! Provides an isolated environment with a real bare git remote.

#![allow(dead_code)]

pub mod commands;
pub mod git;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own bare remote, cache root and home dir.
/// No process-global state is mutated; child processes get everything
/// through `.env()` and `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Root holding every other directory
    pub root: TempDir,
}

impl Test {
    /// Create an environment whose remote has one seed commit.
    ///
    /// The seed commit only holds a hidden `.keep` file, so the store
    /// starts with no keys.
    pub fn new() -> Self {
        let t = Self::bare();

        let seed = t.root.path().join("seed");
        t.git(&["init", "-q", seed.to_str().unwrap()]);
        fs::write(seed.join(".keep"), "").expect("failed to write seed file");
        t.git_in(&seed, &["add", ".keep"]);
        t.git_in(&seed, &["commit", "-q", "-m", "init"]);
        t.git(&[
            "clone",
            "-q",
            "--bare",
            seed.to_str().unwrap(),
            t.remote().to_str().unwrap(),
        ]);

        t
    }

    /// Create an environment whose remote has no commits at all.
    pub fn empty() -> Self {
        let t = Self::bare();
        t.git(&["init", "-q", "--bare", t.remote().to_str().unwrap()]);
        t
    }

    fn bare() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let t = Self { root };
        fs::create_dir_all(t.home()).expect("failed to create home");
        t
    }

    /// Create an environment and set the given secrets.
    pub fn with_secrets(secrets: &[(&str, &str)]) -> Self {
        let t = Self::new();
        for (k, v) in secrets {
            let output = t.set(k, v);
            assert!(
                output.status.success(),
                "Failed to set secret {}: {}",
                k,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Temporary home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Bare remote repository.
    pub fn remote(&self) -> PathBuf {
        self.root.path().join("remote.git")
    }

    /// Default cache root.
    pub fn cache(&self) -> PathBuf {
        self.root.path().join("cache")
    }

    /// Local checkout used by commands with the default cache.
    pub fn checkout(&self) -> PathBuf {
        cellar::core::config::checkout_dir(&self.cache(), self.remote().to_str().unwrap())
    }
}
