//! The primary interface for cellar operations.
//!
//! A `Vault` ties the secret store, the envelope codec and the sync
//! controller together. It holds everything an operation needs (transport
//! and passphrase) so nothing is read from process-global state.

use std::path::Path;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::domain::{Passphrase, Published};
use crate::core::store;
use crate::core::sync::{Repository, Transport};
use crate::core::types::SecretKey;
use crate::error::{CipherError, ConfigProblem, Error, Result};

/// A secret store backed by a synchronized checkout.
#[derive(Debug)]
pub struct Vault<T> {
    repo: Repository<T>,
    passphrase: Option<Passphrase>,
}

impl<T: Transport> Vault<T> {
    /// Bring the checkout of `remote` up to date and open it.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the clone or rebase fails.
    pub fn open(
        transport: T,
        remote: &str,
        checkout: &Path,
        passphrase: Option<Passphrase>,
    ) -> Result<Self> {
        let repo = Repository::prepare(transport, remote, checkout)?;
        Ok(Self { repo, passphrase })
    }

    /// Wrap an already prepared repository.
    pub fn with_repository(repo: Repository<T>, passphrase: Option<Passphrase>) -> Self {
        Self { repo, passphrase }
    }

    /// Local store directory.
    pub fn dir(&self) -> &Path {
        self.repo.dir()
    }

    fn passphrase(&self) -> Result<&Passphrase> {
        self.passphrase
            .as_ref()
            .ok_or_else(|| ConfigProblem::MissingPassphrase.into())
    }

    /// List every key, sorted.
    pub fn list(&self) -> Result<Vec<SecretKey>> {
        store::list(self.dir())
    }

    /// Decrypt the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the key has no file
    /// - `Error::Decrypt` if the envelope is malformed or the passphrase is wrong
    pub fn get(&self, key: &str) -> Result<Zeroizing<String>> {
        let passphrase = self.passphrase()?;
        let envelope = store::read(self.dir(), key)?;

        let plaintext = cipher::decrypt(&envelope, passphrase).map_err(|source| Error::Decrypt {
            key: key.to_string(),
            source,
        })?;

        let value = std::str::from_utf8(&plaintext).map_err(|_| Error::Decrypt {
            key: key.to_string(),
            source: CipherError::NotUtf8,
        })?;

        debug!(key, "secret read");
        Ok(Zeroizing::new(value.to_string()))
    }

    /// Store `value` under `key` and publish the change.
    ///
    /// If the key already holds an envelope that opens to the same value under
    /// this passphrase, the file is left untouched and publishing is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError`, `Error::Encrypt` or `SyncError` from the failing step.
    pub fn set(&self, key: &str, value: &str) -> Result<Published> {
        let passphrase = self.passphrase()?;

        if self.holds(key, value, passphrase)? {
            debug!(key, "value unchanged, keeping envelope");
        } else {
            let envelope =
                cipher::encrypt(value.as_bytes(), passphrase).map_err(|source| Error::Encrypt {
                    key: key.to_string(),
                    source,
                })?;
            store::write(self.dir(), key, &envelope)?;
        }

        let published = self.repo.publish(key, &format!("set {:?}", key))?;
        info!(key, pushed = published.was_pushed(), "secret set");
        Ok(published)
    }

    /// Remove `key` and publish the removal. Removing an absent key still
    /// runs the publish step, which then finds nothing to commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` or `SyncError` from the failing step.
    pub fn del(&self, key: &str) -> Result<Published> {
        store::remove(self.dir(), key)?;
        let published = self.repo.publish(key, &format!("del {:?}", key))?;
        info!(key, pushed = published.was_pushed(), "secret deleted");
        Ok(published)
    }

    /// Whether `key` already holds an envelope of `value`.
    fn holds(&self, key: &str, value: &str, passphrase: &Passphrase) -> Result<bool> {
        let Some(existing) = store::read_existing(self.dir(), key)? else {
            return Ok(false);
        };
        Ok(match cipher::decrypt(&existing, passphrase) {
            Ok(plaintext) => plaintext.as_slice() == value.as_bytes(),
            Err(_) => false,
        })
    }
}
