//! Shared CLI output helpers.
//!
//! Everything here goes to stderr so stdout carries only values and keys.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: hints
//! - Dimmed: secondary info

use console::style;

/// Print a success message with checkmark (green).
///
/// Example: `✓ set "hello"`
pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green().for_stderr(), msg);
}

/// Print an error message (red).
///
/// Example: `✗ git push failed: rejected`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ check CELLAR_PASS`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").cyan().for_stderr(),
        style(msg).cyan().for_stderr()
    );
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    eprintln!("{}", style(msg).dim().for_stderr());
}
