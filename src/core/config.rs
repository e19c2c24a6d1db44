//! Configuration resolution.
//!
//! Values come from command-line flags (each backed by an environment
//! variable), then an optional `config.toml`, then defaults. Every problem is
//! collected so the user sees all of them at once.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Passphrase;
use crate::core::types::RemoteUrl;
use crate::error::{ConfigError, ConfigProblem};

/// Settings read from `config.toml`. The passphrase is never stored here.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Remote repository URL.
    pub repo: Option<String>,
    /// Cache root for local checkouts.
    pub cache_dir: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::APP_DIR).join(constants::CONFIG_FILE))
    }

    /// Load settings from `path`. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigProblem::ConfigFile` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigProblem> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigProblem::ConfigFile {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        debug!(path = %path.display(), "loading settings");
        toml::from_str(&contents).map_err(|e| ConfigProblem::ConfigFile {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}

/// Raw values supplied by the caller (flags and environment).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub git: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub passphrase: Option<String>,
}

/// Fully resolved configuration for one invocation.
#[derive(Debug)]
pub struct Config {
    /// Remote repository URL.
    pub remote: RemoteUrl,
    /// Local checkout directory for `remote`.
    pub checkout: PathBuf,
    /// Git binary.
    pub git: PathBuf,
    /// Passphrase, if one was supplied.
    pub passphrase: Option<Passphrase>,
}

impl Config {
    /// Resolve configuration, collecting every problem.
    ///
    /// `needs_passphrase` makes a missing passphrase an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` listing all problems found.
    pub fn resolve(overrides: Overrides, needs_passphrase: bool) -> Result<Self, ConfigError> {
        let mut problems = Vec::new();

        let settings_path = overrides
            .config_file
            .clone()
            .or_else(Settings::default_path);
        let settings = match settings_path {
            Some(path) => Settings::load(&path).unwrap_or_else(|problem| {
                problems.push(problem);
                Settings::default()
            }),
            None => Settings::default(),
        };

        let remote = non_empty(overrides.repo).or(non_empty(settings.repo));
        if remote.is_none() {
            problems.push(ConfigProblem::MissingRepo);
        }

        let passphrase = non_empty(overrides.passphrase).map(Passphrase::new);
        if needs_passphrase && passphrase.is_none() {
            problems.push(ConfigProblem::MissingPassphrase);
        }

        let git = match locate_git(overrides.git.as_deref()) {
            Ok(path) => Some(path),
            Err(problem) => {
                problems.push(problem);
                None
            }
        };

        let cache_root = overrides
            .cache_dir
            .filter(|p| !p.as_os_str().is_empty())
            .or(settings.cache_dir)
            .or_else(|| dirs::cache_dir().map(|d| d.join(constants::APP_DIR)));
        if cache_root.is_none() {
            problems.push(ConfigProblem::NoCacheDir);
        }

        match (remote, git, cache_root) {
            (Some(remote), Some(git), Some(cache_root)) if problems.is_empty() => {
                let checkout = checkout_dir(&cache_root, &remote);
                debug!(remote = %remote, checkout = %checkout.display(), "config resolved");
                Ok(Self {
                    remote,
                    checkout,
                    git,
                    passphrase,
                })
            }
            _ => Err(ConfigError::Invalid(problems)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Find the git binary, either the one given or the one on `PATH`.
fn locate_git(explicit: Option<&Path>) -> Result<PathBuf, ConfigProblem> {
    let wanted = explicit
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("git"));
    which::which(&wanted).map_err(|e| ConfigProblem::GitNotFound(format!("{}: {}", wanted.display(), e)))
}

/// Local checkout path for `remote` under `cache_root`.
///
/// Strips the scheme, credentials and `.git` suffix, so
/// `git@github.com:me/secrets.git` maps to `<cache_root>/github.com/me/secrets`.
pub fn checkout_dir(cache_root: &Path, remote: &str) -> PathBuf {
    let mut rest = remote.trim();
    if let Some((_, after)) = rest.split_once("://") {
        rest = after;
    }
    if let Some((user, after)) = rest.split_once('@') {
        if !user.contains('/') {
            rest = after;
        }
    }
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let parts: Vec<&str> = rest
        .split(['/', ':', '\\'])
        .filter(|p| !p.is_empty() && *p != "." && *p != "..")
        .collect();

    if parts.is_empty() {
        return cache_root.join("default");
    }
    parts
        .into_iter()
        .fold(cache_root.to_path_buf(), |path, part| path.join(part))
}
