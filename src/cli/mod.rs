//! Command-line interface.

pub mod completions;
pub mod output;
pub mod secrets;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::{Config, Overrides};
use crate::core::constants;
use crate::core::sync::Git;
use crate::core::vault::Vault;
use crate::error::Result;

/// Cellar - a password-protected key/value secret store kept in git.
#[derive(Parser)]
#[command(
    name = "cellar",
    about = "A password-protected key/value secret store kept in git",
    version,
    after_help = "Environment:\n  CELLAR_REPO   URL of the git secret store\n  CELLAR_PASS   Passphrase for encrypting and decrypting secrets\n  CELLAR_LOG    Log filter (e.g. cellar=debug)"
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// URL of the git secret store
    #[arg(long, global = true, env = constants::REPO_ENV, value_name = "URL")]
    pub repo: Option<String>,

    /// Directory holding local checkouts
    #[arg(long, global = true, env = constants::CACHE_ENV, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Path to the git binary
    #[arg(long, global = true, env = constants::GIT_ENV, value_name = "PATH")]
    pub git: Option<PathBuf>,

    /// Settings file (default: <config dir>/cellar/config.toml)
    #[arg(long, global = true, env = constants::CONFIG_ENV, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the value of a secret
    Get {
        /// Secret key (e.g., prod/db/password)
        key: String,
    },

    /// Set a secret value
    Set {
        /// Secret key
        key: String,
        /// Secret value
        value: String,
    },

    /// Delete a secret
    #[command(alias = "rm")]
    Del {
        /// Secret key
        key: String,
    },

    /// List all secret keys
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Global options that locate the store.
struct Globals {
    repo: Option<String>,
    cache_dir: Option<PathBuf>,
    git: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl Globals {
    /// Resolve configuration and bring the store up to date.
    fn open(self, needs_passphrase: bool) -> Result<Vault<Git>> {
        let overrides = Overrides {
            repo: self.repo,
            cache_dir: self.cache_dir,
            git: self.git,
            config_file: self.config,
            passphrase: std::env::var(constants::PASSPHRASE_ENV).ok(),
        };
        let config = Config::resolve(overrides, needs_passphrase)?;

        Vault::open(
            Git::new(&config.git),
            &config.remote,
            &config.checkout,
            config.passphrase,
        )
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let globals = Globals {
        repo: cli.repo,
        cache_dir: cli.cache_dir,
        git: cli.git,
        config: cli.config,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Get { key } => secrets::get(&globals.open(true)?, &key, &mut out),
        Set { key, value } => secrets::set(&globals.open(true)?, &key, &value),
        Del { key } => secrets::del(&globals.open(false)?, &key),
        List { json } => secrets::list(&globals.open(false)?, json, &mut out),
        Completions { shell } => completions::execute(shell, &mut out),
    }
}
