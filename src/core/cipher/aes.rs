//! AES-256-GCM envelope cipher.
//!
//! Every encryption draws a fresh salt and nonce, derives the key with
//! PBKDF2, and seals with no associated data.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use super::envelope::Envelope;
use super::kdf::derive_key;
use super::Cipher;
use crate::core::constants::{NONCE_LEN, SALT_LEN};
use crate::core::domain::Passphrase;
use crate::error::CipherError;

/// Passphrase-keyed AES-256-GCM.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesGcm;

impl Cipher for AesGcm {
    fn encrypt(&self, plaintext: &[u8], passphrase: &Passphrase) -> Result<String, CipherError> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let key = derive_key(passphrase, &salt);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::Encryption)?;

        let sealed = Envelope {
            salt,
            nonce,
            ciphertext,
        }
        .seal();

        trace!(envelope_len = sealed.len(), "encrypted");
        Ok(sealed)
    }

    fn decrypt(
        &self,
        envelope: &str,
        passphrase: &Passphrase,
    ) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        trace!(envelope_len = envelope.len(), "decrypting");

        let envelope = Envelope::parse(envelope)?;
        let key = derive_key(passphrase, &envelope.salt);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&envelope.nonce),
                envelope.ciphertext.as_slice(),
            )
            .map_err(|_| CipherError::Authentication)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(plaintext))
    }
}
