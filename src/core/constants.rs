//! Constants used throughout cellar.
//!
//! Centralizes envelope parameters and configuration names. Changing any of
//! the envelope values makes every existing secret unreadable.

/// Salt length in bytes, stored at the front of every envelope.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes, stored after the salt.
pub const NONCE_LEN: usize = 12;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const KDF_ROUNDS: u32 = 4096;

/// Remote repository URL.
pub const REPO_ENV: &str = "CELLAR_REPO";

/// Passphrase used to derive envelope keys.
pub const PASSPHRASE_ENV: &str = "CELLAR_PASS";

/// Cache root holding local checkouts.
pub const CACHE_ENV: &str = "CELLAR_CACHE";

/// Path to the git binary.
pub const GIT_ENV: &str = "CELLAR_GIT";

/// Path to the settings file.
pub const CONFIG_ENV: &str = "CELLAR_CONFIG";

/// Log filter.
pub const LOG_ENV: &str = "CELLAR_LOG";

/// Application directory name under the user cache and config dirs.
pub const APP_DIR: &str = "cellar";

/// Settings file name inside the user config dir.
pub const CONFIG_FILE: &str = "config.toml";
