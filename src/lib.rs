//! sealbox - password-based file encryption.
//!
//! Provides the following capabilities:
//! - Encrypt a file into a self-describing `.encrypted` container
//!   (PBKDF2-HMAC-SHA256 key, AES-256-GCM, original filename in metadata)
//! - Decrypt it again, recovering the original filename
//! - Score password strength and generate strong passwords/passphrases
//!
//! Pipeline: validate -> derive key -> seal -> encode container (and back)

pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod pipeline;

// Re-export main types
pub use config::Config;
pub use error::{ErrorKind, Result, SealError};
pub use password::{evaluate, generate_passphrase, generate_password, StrengthLevel, StrengthResult};
pub use pipeline::{decrypt, encrypt, DecryptedFile, EncryptedFile, FilenameSource, InputFile};
