//! Crypto module - building blocks of the `.encrypted` container.
//!
//! - PBKDF2-HMAC-SHA256 key derivation from a password
//! - AES-256-GCM sealing/opening
//! - Container byte layout (salt, nonce, filename metadata, ciphertext)

pub mod container;
pub mod encryption;
pub mod key_derivation;

pub use container::{ContainerParts, ENCRYPTED_SUFFIX, HEADER_LEN, MAX_FILENAME_LEN, METADATA_LEN};
pub use encryption::{generate_nonce, Encryptor, NONCE_LEN, TAG_LEN};
pub use key_derivation::{derive_key, generate_salt, DerivedKey, KEY_LEN, SALT_LEN};
