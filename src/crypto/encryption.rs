//! AES-256-GCM Encryption/Decryption.
//!
//! AES-GCM is Authenticated Encryption with Associated Data (AEAD): it
//! provides both confidentiality and integrity for the data.
//!
//! - Nonce 96-bit (12 bytes) - MUST be unique per message under the same key
//! - Tag 128-bit (16 bytes), appended to the ciphertext
//!
//! A failed tag check is the only signal of a wrong password. It cannot be
//! told apart from corruption, so both surface as
//! [`SealError::AuthenticationFailed`].

use super::key_derivation::DerivedKey;
use crate::error::{Result, SealError};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};

/// Nonce length (bytes) - 96 bits
pub const NONCE_LEN: usize = 12;

/// Authentication tag length (bytes) - 128 bits
pub const TAG_LEN: usize = 16;

/// Seals and opens payloads with an already derived key.
pub struct Encryptor {
    cipher: Aes256Gcm,
}

impl Encryptor {
    pub fn new(key: &DerivedKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// Encrypt `plaintext` under `nonce`.
    /// Returns: ciphertext (plaintext length + 16 bytes tag)
    pub fn seal(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|_| SealError::Cipher)
    }

    /// Decrypt and verify `sealed` (ciphertext || tag).
    pub fn open(&self, sealed: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        if sealed.len() < TAG_LEN {
            return Err(SealError::AuthenticationFailed);
        }

        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| SealError::AuthenticationFailed)
    }
}

/// Generate a fresh random nonce
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}
