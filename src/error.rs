//! Error types for cellar.
//!
//! Each concern has its own enum; [`Error`] wraps them and adds the key
//! context for cipher failures so messages read like
//! `failed to decrypt "hello": message authentication failed`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("failed to decrypt {key:?}: {source}")]
    Decrypt {
        key: String,
        #[source]
        source: CipherError,
    },

    #[error("failed to encrypt {key:?}: {source}")]
    Encrypt {
        key: String,
        #[source]
        source: CipherError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration problems, all reported at once.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{}", join_problems(.0))]
    Invalid(Vec<ConfigProblem>),
}

impl ConfigError {
    /// The individual problems.
    pub fn problems(&self) -> &[ConfigProblem] {
        match self {
            Self::Invalid(problems) => problems,
        }
    }
}

impl From<ConfigProblem> for ConfigError {
    fn from(problem: ConfigProblem) -> Self {
        Self::Invalid(vec![problem])
    }
}

impl From<ConfigProblem> for Error {
    fn from(problem: ConfigProblem) -> Self {
        Error::Config(problem.into())
    }
}

fn join_problems(problems: &[ConfigProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single missing or invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("CELLAR_REPO not set")]
    MissingRepo,

    #[error("CELLAR_PASS not set")]
    MissingPassphrase,

    #[error("git not found: {0}")]
    GitNotFound(String),

    #[error("no cache directory available, set CELLAR_CACHE")]
    NoCacheDir,

    #[error("invalid config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

/// Secret key validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key cannot be empty")]
    EmptyKey,

    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },
}

/// Envelope codec errors.
///
/// `Authentication` deliberately carries no detail: a wrong passphrase and a
/// tampered envelope look the same.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("failed to decode base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("envelope too short: {len} bytes, need at least {min}")]
    Format { len: usize, min: usize },

    #[error("message authentication failed")]
    Authentication,

    #[error("encryption failed")]
    Encryption,

    #[error("decrypted value is not valid UTF-8")]
    NotUtf8,
}

/// Local filesystem errors inside the secret store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret not found: {key:?} ({})", path.display())]
    NotFound { key: String, path: PathBuf },

    #[error("failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a secret file: {}", path.display())]
    NotAFile { path: PathBuf },
}

/// The git step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Clone,
    Pull,
    Add,
    Status,
    Commit,
    Push,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clone => "git clone",
            Self::Pull => "git pull --rebase",
            Self::Add => "git add",
            Self::Status => "git status",
            Self::Commit => "git commit",
            Self::Push => "git push",
        };
        f.write_str(name)
    }
}

/// Repository synchronization errors.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to prepare checkout {}: {source}", path.display())]
    Checkout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: {source}")]
    Spawn {
        step: SyncStep,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: {stderr}")]
    Failed { step: SyncStep, stderr: String },

    #[error("checkout {} tracks {found:?}, not {expected:?}", path.display())]
    ForeignCheckout {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

impl SyncError {
    /// The step that failed, if the failure came from running git.
    pub fn step(&self) -> Option<SyncStep> {
        match self {
            Self::Checkout { .. } | Self::ForeignCheckout { .. } => None,
            Self::Spawn { step, .. } | Self::Failed { step, .. } => Some(*step),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
