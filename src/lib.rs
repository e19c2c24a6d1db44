//! Cellar - a password-protected key/value secret store kept in git.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secrets       # get / set / del / list
//! │   ├── completions   # Shell completions
//! │   └── output        # Styled status output
//! └── core/             # Core library components
//!     ├── config        # Flag / env / config.toml resolution
//!     ├── cipher/       # Envelope codec
//!     │   ├── kdf       # PBKDF2-HMAC-SHA256
//!     │   ├── envelope  # salt || nonce || ciphertext, base64
//!     │   └── aes       # AES-256-GCM
//!     ├── store         # One file per secret
//!     ├── sync/         # Repository sync controller
//!     │   └── git       # git CLI transport
//!     └── vault         # get / set / del / list over store + codec + sync
//! ```
//!
//! # Model
//!
//! - Every secret is a file in a git checkout, named by its `/`-separated key
//! - Each value is sealed with a key derived from one shared passphrase and a
//!   fresh random salt
//! - Reads and writes start from the remote tip; writes are pushed back
//!   immediately, and conflicts fail loudly instead of merging

pub mod cli;
pub mod core;
pub mod error;
