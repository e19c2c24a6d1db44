//! Command helper methods for Test.

use std::path::Path;
use std::process::Output;

use assert_cmd::Command;

use super::fixtures::PASSPHRASE;
use super::Test;

impl Test {
    /// Create a cellar command with an isolated environment.
    ///
    /// The command points at the test remote and default cache, uses the
    /// standard passphrase and never reads the user's own configuration.
    pub fn cmd(&self) -> Command {
        self.cmd_with_cache(&self.cache())
    }

    /// Like [`Test::cmd`] but checking out under a different cache root.
    pub fn cmd_with_cache(&self, cache: &Path) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cellar").expect("failed to find cellar binary");
        cmd.env("HOME", self.home())
            // Windows uses USERPROFILE instead of HOME for home directory
            .env("USERPROFILE", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("NO_COLOR", "1")
            .env("CELLAR_REPO", self.remote())
            .env("CELLAR_PASS", PASSPHRASE)
            .env("CELLAR_CACHE", cache)
            .env_remove("CELLAR_LOG")
            .env_remove("CELLAR_CONFIG")
            .env_remove("CELLAR_GIT")
            .current_dir(self.root.path());
        cmd
    }

    /// Shortcut for `cellar set`.
    pub fn set(&self, key: &str, val: &str) -> Output {
        self.cmd()
            .args(["set", key, val])
            .output()
            .expect("failed to run cellar set")
    }

    /// Shortcut for `cellar get`.
    pub fn get(&self, key: &str) -> Output {
        self.cmd()
            .args(["get", key])
            .output()
            .expect("failed to run cellar get")
    }

    /// Shortcut for `cellar del`.
    pub fn del(&self, key: &str) -> Output {
        self.cmd()
            .args(["del", key])
            .output()
            .expect("failed to run cellar del")
    }

    /// Shortcut for `cellar list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run cellar list")
    }

    /// Shortcut for `cellar list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run cellar list --json")
    }
}
