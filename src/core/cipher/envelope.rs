//! Envelope layout.
//!
//! ```text
//! base64( salt[16] || nonce[12] || ciphertext+tag )
//! ```
//!
//! Standard alphabet with padding. There is no header or version byte, so
//! the layout and the KDF/cipher parameters are fixed for every stored secret.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::core::constants::{NONCE_LEN, SALT_LEN};
use crate::error::CipherError;

/// Minimum decoded length: salt and nonce with an empty ciphertext.
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// A decoded envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// AES-GCM output: ciphertext with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode the envelope as base64 text.
    pub fn seal(&self) -> String {
        let mut raw = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    /// Decode envelope text.
    ///
    /// Line breaks are ignored so a file that gained a trailing newline in an
    /// editor still opens.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Decode` for malformed base64 and
    /// `CipherError::Format` when the decoded bytes cannot hold a salt and nonce.
    pub fn parse(text: &str) -> Result<Self, CipherError> {
        let compact: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let raw = STANDARD.decode(compact.as_bytes())?;

        if raw.len() < HEADER_LEN {
            return Err(CipherError::Format {
                len: raw.len(),
                min: HEADER_LEN,
            });
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let mut envelope = Self {
            salt: [0u8; SALT_LEN],
            nonce: [0u8; NONCE_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.nonce.copy_from_slice(nonce);
        Ok(envelope)
    }
}
