//! Core library components.
//!
//! The envelope codec, the secret file store and the repository sync
//! controller, composed by [`vault::Vault`].

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod store;
pub mod sync;
pub mod types;
pub mod validation;
pub mod vault;
