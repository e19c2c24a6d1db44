//! Envelope codec.
//!
//! Turns plaintext plus a passphrase into self-describing base64 text and
//! back. A fresh random salt per encryption means two secrets with the same
//! value never share an envelope, and authenticated encryption means a wrong
//! passphrase or a tampered file fails instead of yielding garbage.
//!
//! ## Format
//!
//! ```text
//! base64( salt[16] || nonce[12] || AES-256-GCM(key, nonce, plaintext) )
//! key = PBKDF2-HMAC-SHA256(passphrase, salt, 4096 rounds, 32 bytes)
//! ```

use zeroize::Zeroizing;

use crate::core::domain::Passphrase;
use crate::error::CipherError;

mod aes;
pub mod envelope;
mod kdf;

pub use aes::AesGcm;
pub use envelope::Envelope;
pub use kdf::derive_key;

/// Passphrase-based envelope cipher.
pub trait Cipher {
    /// Encrypt plaintext into envelope text.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encryption` if the cipher rejects the input.
    fn encrypt(&self, plaintext: &[u8], passphrase: &Passphrase) -> Result<String, CipherError>;

    /// Open envelope text, returning the exact original plaintext.
    ///
    /// # Errors
    ///
    /// - `CipherError::Decode` for malformed base64
    /// - `CipherError::Format` for a truncated envelope
    /// - `CipherError::Authentication` for a wrong passphrase or tampering
    fn decrypt(
        &self,
        envelope: &str,
        passphrase: &Passphrase,
    ) -> Result<Zeroizing<Vec<u8>>, CipherError>;
}

/// Encrypt with the default cipher.
pub fn encrypt(plaintext: &[u8], passphrase: &Passphrase) -> Result<String, CipherError> {
    AesGcm.encrypt(plaintext, passphrase)
}

/// Decrypt with the default cipher.
pub fn decrypt(envelope: &str, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    AesGcm.decrypt(envelope, passphrase)
}
