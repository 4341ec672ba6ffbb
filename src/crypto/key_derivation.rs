//! Key derivation with PBKDF2-HMAC-SHA256.
//!
//! The iteration count is part of the container contract: files written
//! with one count cannot be opened with another, so it is a constant and
//! not a config option.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroize;

/// Salt length (bytes)
pub const SALT_LEN: usize = 16;

/// Key length (bytes) - 256 bits for AES-256
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 256-bit key derived from a password.
///
/// Lives only for one encrypt/decrypt call and is wiped on drop.
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the container key from a password and salt.
///
/// Deterministic: the same `(password, salt)` always yields the same key.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut bytes);
    DerivedKey { bytes }
}

/// Generate a fresh random salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_salt() -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        for (i, b) in salt.iter_mut().enumerate() {
            *b = i as u8;
        }
        salt
    }

    #[test]
    fn test_known_vector() {
        let key = derive_key(b"correct horse battery staple", &counting_salt());
        let expected: [u8; KEY_LEN] = [
            0x49, 0xd4, 0x9c, 0x25, 0xf5, 0x97, 0x84, 0x62, 0x09, 0xf0, 0xd9, 0x2e, 0x77, 0x70,
            0xab, 0x64, 0xe1, 0xc7, 0x5e, 0x94, 0xb4, 0xce, 0x6c, 0x50, 0x92, 0x65, 0xee, 0x67,
            0x17, 0x5d, 0x2a, 0x1e,
        ];
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn test_derive_key_deterministic() {
        let salt = [0u8; SALT_LEN];

        let key1 = derive_key(b"test_password_123", &salt);
        let key2 = derive_key(b"test_password_123", &salt);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_password() {
        let salt = [0u8; SALT_LEN];

        let key1 = derive_key(b"password1", &salt);
        let key2 = derive_key(b"password2", &salt);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_salt() {
        let key1 = derive_key(b"same_password", &[0u8; SALT_LEN]);
        let key2 = derive_key(b"same_password", &[1u8; SALT_LEN]);

        // Same password, different salt -> different key
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_generate_salt_is_fresh() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key(b"secret", &[7u8; SALT_LEN]);
        let printed = format!("{:?}", key);
        assert_eq!(printed, r#"DerivedKey { bytes: "[REDACTED]" }"#);
    }
}
