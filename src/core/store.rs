//! Secret file store.
//!
//! Each secret is one file under the checkout root, named by its key. Any
//! entry whose name starts with `.` (the `.git` directory, temp files) is
//! invisible to listing, and keys cannot name such entries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::types::{EnvelopeText, SecretKey};
use crate::core::validation::validate_key;
use crate::error::{Result, StoreError};

/// Map a key onto its file path under `dir`.
///
/// # Errors
///
/// Returns `ValidationError` if the key is not a safe relative path.
pub fn key_path(dir: &Path, key: &str) -> Result<PathBuf> {
    validate_key(key)?;
    Ok(key.split('/').fold(dir.to_path_buf(), |path, part| path.join(part)))
}

/// List every key under `dir`, sorted.
///
/// # Errors
///
/// Returns `StoreError::Walk` if a directory cannot be read.
pub fn list(dir: &Path) -> Result<Vec<SecretKey>> {
    let mut keys = Vec::new();
    walk(dir, "", &mut keys)?;
    keys.sort();
    debug!(dir = %dir.display(), count = keys.len(), "listed secrets");
    Ok(keys)
}

fn walk(dir: &Path, prefix: &str, keys: &mut Vec<SecretKey>) -> Result<()> {
    let walk_err = |source| StoreError::Walk {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(walk_err)? {
        let entry = entry.map_err(walk_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let key = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };

        let file_type = entry.file_type().map_err(walk_err)?;
        if file_type.is_dir() {
            walk(&entry.path(), &key, keys)?;
        } else if file_type.is_file() {
            keys.push(key);
        }
    }

    Ok(())
}

/// Read the envelope text stored under `key`.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if no file exists for the key.
pub fn read(dir: &Path, key: &str) -> Result<EnvelopeText> {
    let path = key_path(dir, key)?;
    debug!(path = %path.display(), "reading secret");

    fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound {
            key: key.to_string(),
            path,
        }
        .into(),
        _ => StoreError::Read { path, source }.into(),
    })
}

/// Read the envelope text under `key`, or `None` if there is none.
pub fn read_existing(dir: &Path, key: &str) -> Result<Option<EnvelopeText>> {
    match read(dir, key) {
        Ok(text) => Ok(Some(text)),
        Err(crate::error::Error::Store(StoreError::NotFound { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write envelope text under `key`, creating parent directories.
///
/// The text lands in a hidden sibling file first and is renamed into place,
/// so the key never holds a partial envelope.
///
/// # Errors
///
/// Returns `StoreError` if a directory or the file cannot be written.
pub fn write(dir: &Path, key: &str, contents: &str) -> Result<PathBuf> {
    let path = key_path(dir, key)?;
    let parent = path.parent().unwrap_or(dir);

    fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = parent.join(format!(".{}.tmp", file_name));

    debug!(path = %path.display(), "writing secret");
    fs::write(&tmp, contents).map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write { path, source }.into());
    }

    Ok(path)
}

/// Delete the file under `key`. A missing file is not an error.
///
/// # Errors
///
/// Returns `StoreError::NotAFile` if the key names a directory.
pub fn remove(dir: &Path, key: &str) -> Result<PathBuf> {
    let path = key_path(dir, key)?;

    match fs::symlink_metadata(&path) {
        Ok(meta) if meta.is_dir() => return Err(StoreError::NotAFile { path }.into()),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "secret already absent");
            return Ok(path);
        }
        Err(source) => return Err(StoreError::Remove { path, source }.into()),
    }

    debug!(path = %path.display(), "removing secret");
    fs::remove_file(&path).map_err(|source| StoreError::Remove {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
