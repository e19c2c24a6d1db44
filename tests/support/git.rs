//! Git helpers for inspecting and seeding test repositories.

use std::path::Path;
use std::process::{Command, Output};

use super::Test;

/// Apply the isolated git environment to a command.
pub fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com");
}

impl Test {
    /// Run git with the test environment, asserting success.
    pub fn git(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new("git");
        isolate(&mut cmd, &self.home());
        cmd.current_dir(self.root.path()).args(args);
        let output = cmd.output().expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Run git inside `dir`.
    pub fn git_in(&self, dir: &Path, args: &[&str]) -> Output {
        let mut full = vec!["-C", dir.to_str().unwrap()];
        full.extend_from_slice(args);
        self.git(&full)
    }

    /// Commit subjects on the remote, newest first. Empty for a remote with
    /// no commits.
    pub fn remote_log(&self) -> Vec<String> {
        let remote = self.remote();
        let mut cmd = Command::new("git");
        isolate(&mut cmd, &self.home());
        let output = cmd
            .args(["--git-dir", remote.to_str().unwrap(), "log", "--format=%s"])
            .output()
            .expect("failed to run git log");
        if !output.status.success() {
            return Vec::new();
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of commits on the remote.
    pub fn remote_commits(&self) -> usize {
        self.remote_log().len()
    }

    /// Content of `path` at the remote tip.
    pub fn remote_file(&self, path: &str) -> Option<String> {
        let remote = self.remote();
        let mut cmd = Command::new("git");
        isolate(&mut cmd, &self.home());
        let output = cmd
            .args(["--git-dir", remote.to_str().unwrap(), "show"])
            .arg(format!("HEAD:{}", path))
            .output()
            .expect("failed to run git show");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Make the remote refuse every push until [`Test::accept_pushes`].
    #[cfg(unix)]
    pub fn reject_pushes(&self) {
        use std::os::unix::fs::PermissionsExt;

        let hook = self.remote().join("hooks").join("pre-receive");
        std::fs::create_dir_all(hook.parent().unwrap()).expect("failed to create hooks dir");
        std::fs::write(&hook, "#!/bin/sh\necho 'pushes are closed' >&2\nexit 1\n")
            .expect("failed to write hook");
        std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755))
            .expect("failed to make hook executable");
    }

    /// Undo [`Test::reject_pushes`].
    #[cfg(unix)]
    pub fn accept_pushes(&self) {
        std::fs::remove_file(self.remote().join("hooks").join("pre-receive"))
            .expect("failed to remove hook");
    }
}
