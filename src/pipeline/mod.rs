//! Encrypt/decrypt pipelines over whole in-memory buffers.
//!
//! Each call owns its own salt, nonce and derived key; nothing is shared
//! between calls, so independent files can be processed in parallel.

mod decrypt;
mod encrypt;

pub use decrypt::decrypt;
pub use encrypt::encrypt;

use crate::error::{Result, SealError};

/// A file handed to a pipeline: its name and full contents.
///
/// An empty `name` means no file was selected.
#[derive(Debug, Clone, Copy)]
pub struct InputFile<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> InputFile<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// Output of [`encrypt`]: container bytes and the suggested download name.
#[derive(Debug, Clone)]
pub struct EncryptedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Where a decrypted file's name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameSource {
    /// Read from the container metadata.
    Recovered,
    /// Metadata was unusable, name was synthesized.
    Fallback,
}

/// Output of [`decrypt`]: plaintext and the name to save it under.
#[derive(Debug, Clone)]
pub struct DecryptedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub filename_source: FilenameSource,
}

/// Checks shared by both pipelines, run before any crypto work.
fn validate(file: &InputFile<'_>, password: &str) -> Result<()> {
    if file.name.is_empty() {
        return Err(SealError::NoFileSelected);
    }
    if password.is_empty() {
        return Err(SealError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_file() {
        let file = InputFile::new("", b"data");
        assert!(matches!(
            validate(&file, "pw"),
            Err(SealError::NoFileSelected)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_password() {
        let file = InputFile::new("a.txt", b"data");
        assert!(matches!(validate(&file, ""), Err(SealError::EmptyPassword)));
    }

    #[test]
    fn test_validate_accepts_empty_contents() {
        let file = InputFile::new("empty.txt", b"");
        assert!(validate(&file, "pw").is_ok());
    }
}
