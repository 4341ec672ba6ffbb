//! Error types for sealbox operations.
//!
//! Every fatal outcome of an encrypt or decrypt call is one `SealError`.
//! Filename recovery and breach lookups never produce errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SealError>;

/// Coarse grouping of [`SealError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input rejected before any crypto work.
    Validation,
    /// Container too short to hold the fixed header.
    MalformedContainer,
    /// AEAD tag did not verify.
    AuthenticationFailure,
    /// The cipher backend refused to seal.
    Crypto,
}

#[derive(Error, Debug)]
pub enum SealError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Filename is {len} bytes, at most {max} bytes fit in the container")]
    FilenameTooLong { len: usize, max: usize },

    #[error("File is {size} bytes, the limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Malformed container: {len} bytes, need at least {min}")]
    MalformedContainer { len: usize, min: usize },

    #[error("Incorrect password or corrupted file")]
    AuthenticationFailed,

    #[error("Encryption failed in cipher backend")]
    Cipher,
}

impl SealError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPassword
            | Self::NoFileSelected
            | Self::FilenameTooLong { .. }
            | Self::FileTooLarge { .. } => ErrorKind::Validation,
            Self::MalformedContainer { .. } => ErrorKind::MalformedContainer,
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailure,
            Self::Cipher => ErrorKind::Crypto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_grouping() {
        assert_eq!(SealError::EmptyPassword.kind(), ErrorKind::Validation);
        assert_eq!(
            SealError::FilenameTooLong { len: 200, max: 126 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            SealError::MalformedContainer { len: 3, min: 156 }.kind(),
            ErrorKind::MalformedContainer
        );
        assert_eq!(
            SealError::AuthenticationFailed.kind(),
            ErrorKind::AuthenticationFailure
        );
    }

    #[test]
    fn test_auth_failure_message() {
        assert_eq!(
            SealError::AuthenticationFailed.to_string(),
            "Incorrect password or corrupted file"
        );
    }
}
