//! Key derivation.
//!
//! PBKDF2-HMAC-SHA256, [`KDF_ROUNDS`] rounds, [`KEY_LEN`]-byte output. The
//! work factor is part of the envelope format.

use sha2::Sha256;
use zeroize::Zeroizing;

use crate::core::constants::{KDF_ROUNDS, KEY_LEN, SALT_LEN};
use crate::core::domain::Passphrase;

/// Derive a 32-byte key from a passphrase and salt.
pub fn derive_key(passphrase: &Passphrase, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, KDF_ROUNDS, &mut *key);
    key
}
