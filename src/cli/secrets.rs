//! Secret commands (get, set, del, list).
//!
//! Values and keys go to the writer passed in; status lines go to stderr.

use std::io::Write;

use crate::cli::output;
use crate::core::sync::Transport;
use crate::core::vault::Vault;
use crate::error::Result;

/// Print a secret value.
pub fn get<T: Transport>(vault: &Vault<T>, key: &str, out: &mut impl Write) -> Result<()> {
    let value = vault.get(key)?;
    writeln!(out, "{}", value.as_str())?;
    Ok(())
}

/// Set a secret value.
pub fn set<T: Transport>(vault: &Vault<T>, key: &str, value: &str) -> Result<()> {
    let published = vault.set(key, value)?;
    output::success(&format!("set {:?}", key));
    if !published.was_pushed() {
        output::dimmed("unchanged, nothing to push");
    }
    Ok(())
}

/// Delete a secret.
pub fn del<T: Transport>(vault: &Vault<T>, key: &str) -> Result<()> {
    let published = vault.del(key)?;
    output::success(&format!("deleted {:?}", key));
    if !published.was_pushed() {
        output::dimmed("not present, nothing to push");
    }
    Ok(())
}

/// List all secret keys.
pub fn list<T: Transport>(vault: &Vault<T>, json: bool, out: &mut impl Write) -> Result<()> {
    let keys = vault.list()?;

    if json {
        let value = serde_json::json!({
            "keys": keys,
            "count": keys.len()
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else if keys.is_empty() {
        output::dimmed("no secrets stored");
    } else {
        for key in keys {
            writeln!(out, "{}", key)?;
        }
    }

    Ok(())
}
