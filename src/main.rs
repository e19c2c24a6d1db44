//! Cellar - a password-protected key/value secret store kept in git.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cellar::cli::output;
use cellar::cli::{execute, Cli};
use cellar::core::constants;
use cellar::error::{CipherError, Error};

fn main() {
    let cli = Cli::parse();

    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cellar=debug")
        } else {
            EnvFilter::new("cellar=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(_) => Some("run: cellar --help"),
            Error::Decrypt {
                source: CipherError::Authentication,
                ..
            } => Some("check CELLAR_PASS"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
