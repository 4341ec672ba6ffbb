//! Container format - the byte layout of an `.encrypted` file.
//!
//! ```text
//! offset  len   field
//! 0       16    salt
//! 16      12    nonce
//! 28      128   metadata: u16 BE filename length | filename | zero padding
//! 156     ..    ciphertext || 16-byte GCM tag
//! ```
//!
//! The length prefix is big-endian so files written by the browser
//! front end decode unchanged.

use super::encryption::NONCE_LEN;
use super::key_derivation::SALT_LEN;
use crate::error::{Result, SealError};

/// Fixed size of the metadata region
pub const METADATA_LEN: usize = 128;

/// Size of the filename length prefix
const LEN_PREFIX: usize = 2;

/// Longest filename (UTF-8 bytes) the metadata region can hold
pub const MAX_FILENAME_LEN: usize = METADATA_LEN - LEN_PREFIX;

/// Everything before the ciphertext
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN + METADATA_LEN;

/// Suffix appended to encrypted output names
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// A decoded container, borrowing the input buffer.
#[derive(Debug)]
pub struct ContainerParts<'a> {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub metadata: &'a [u8; METADATA_LEN],
    pub sealed: &'a [u8],
}

/// Build the metadata region for `filename`.
pub fn encode_metadata(filename: &str) -> Result<[u8; METADATA_LEN]> {
    let name = filename.as_bytes();
    if name.len() > MAX_FILENAME_LEN {
        return Err(SealError::FilenameTooLong {
            len: name.len(),
            max: MAX_FILENAME_LEN,
        });
    }

    let mut metadata = [0u8; METADATA_LEN];
    // Fits: MAX_FILENAME_LEN < u16::MAX
    metadata[..LEN_PREFIX].copy_from_slice(&(name.len() as u16).to_be_bytes());
    metadata[LEN_PREFIX..LEN_PREFIX + name.len()].copy_from_slice(name);
    Ok(metadata)
}

/// Concatenate salt || nonce || metadata || sealed.
pub fn encode(
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    filename: &str,
    sealed: &[u8],
) -> Result<Vec<u8>> {
    let metadata = encode_metadata(filename)?;
    Ok(assemble(salt, nonce, &metadata, sealed))
}

/// [`encode`] for a metadata region that was already built.
pub fn assemble(
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    metadata: &[u8; METADATA_LEN],
    sealed: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + sealed.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(nonce);
    out.extend_from_slice(metadata);
    out.extend_from_slice(sealed);
    out
}

/// Split a container into its regions by fixed offsets.
pub fn decode(bytes: &[u8]) -> Result<ContainerParts<'_>> {
    let malformed = || SealError::MalformedContainer {
        len: bytes.len(),
        min: HEADER_LEN,
    };

    if bytes.len() < HEADER_LEN {
        return Err(malformed());
    }

    let (salt_bytes, rest) = bytes.split_at(SALT_LEN);
    let (nonce_bytes, rest) = rest.split_at(NONCE_LEN);
    let (metadata_bytes, sealed) = rest.split_at(METADATA_LEN);

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(nonce_bytes);
    let metadata = <&[u8; METADATA_LEN]>::try_from(metadata_bytes).map_err(|_| malformed())?;

    Ok(ContainerParts {
        salt,
        nonce,
        metadata,
        sealed,
    })
}

/// Read the original filename back out of the metadata region.
///
/// Returns `None` when the prefix is out of range, the bytes are not UTF-8,
/// or nothing usable is left after trimming. Callers fall back to
/// [`fallback_name`].
pub fn extract_filename(metadata: &[u8; METADATA_LEN]) -> Option<String> {
    let len = u16::from_be_bytes([metadata[0], metadata[1]]) as usize;
    if len > MAX_FILENAME_LEN {
        return None;
    }

    let raw = std::str::from_utf8(&metadata[LEN_PREFIX..LEN_PREFIX + len]).ok()?;
    let name = raw.trim_end_matches('\0').trim();
    if name.is_empty() || name.contains('\0') {
        return None;
    }

    Some(name.to_string())
}

/// `<original>.encrypted`
pub fn encrypted_name(original: &str) -> String {
    format!("{}{}", original, ENCRYPTED_SUFFIX)
}

/// Name to use when the metadata cannot be trusted.
///
/// Strips a trailing `.encrypted` from the container's own name, or makes
/// up `decrypted_<unix millis>` if nothing is left.
pub fn fallback_name(source_name: &str) -> String {
    let stem = source_name
        .strip_suffix(ENCRYPTED_SUFFIX)
        .unwrap_or(source_name);
    if stem.is_empty() {
        format!("decrypted_{}", chrono::Utc::now().timestamp_millis())
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_prefix(len: u16, body: &[u8]) -> [u8; METADATA_LEN] {
        let mut metadata = [0u8; METADATA_LEN];
        metadata[..2].copy_from_slice(&len.to_be_bytes());
        metadata[2..2 + body.len()].copy_from_slice(body);
        metadata
    }

    #[test]
    fn test_layout_offsets() -> Result<()> {
        let salt = [0xAA; SALT_LEN];
        let nonce = [0xBB; NONCE_LEN];
        let out = encode(&salt, &nonce, "a.txt", b"sealed-bytes")?;

        assert_eq!(out.len(), HEADER_LEN + 12);
        assert_eq!(&out[0..16], &salt);
        assert_eq!(&out[16..28], &nonce);
        // Big-endian length prefix
        assert_eq!(&out[28..30], &[0x00, 0x05]);
        assert_eq!(&out[30..35], b"a.txt");
        assert!(out[35..156].iter().all(|&b| b == 0));
        assert_eq!(&out[156..], b"sealed-bytes");
        Ok(())
    }

    #[test]
    fn test_decode_regions() -> Result<()> {
        let out = encode(&[1; SALT_LEN], &[2; NONCE_LEN], "notes.md", b"xyz")?;
        let parts = decode(&out)?;

        assert_eq!(parts.salt, [1; SALT_LEN]);
        assert_eq!(parts.nonce, [2; NONCE_LEN]);
        assert_eq!(parts.sealed, b"xyz");
        assert_eq!(extract_filename(parts.metadata).as_deref(), Some("notes.md"));
        Ok(())
    }

    #[test]
    fn test_assemble_matches_encode() -> Result<()> {
        let metadata = encode_metadata("a.txt")?;
        let assembled = assemble(&[3; SALT_LEN], &[4; NONCE_LEN], &metadata, b"ct");
        assert_eq!(assembled, encode(&[3; SALT_LEN], &[4; NONCE_LEN], "a.txt", b"ct")?);
        Ok(())
    }

    #[test]
    fn test_decode_header_only() -> Result<()> {
        let parts = decode(&[0u8; HEADER_LEN])?;
        assert!(parts.sealed.is_empty());
        Ok(())
    }

    #[test]
    fn test_decode_too_short() {
        for len in [0, 1, 28, HEADER_LEN - 1] {
            let input = vec![0u8; len];
            let result = decode(&input);
            assert!(
                matches!(
                    result,
                    Err(SealError::MalformedContainer { len: l, min: HEADER_LEN }) if l == len
                ),
                "length {} should be malformed",
                len
            );
        }
    }

    #[test]
    fn test_filename_limit() {
        let exact = "x".repeat(MAX_FILENAME_LEN);
        assert!(encode_metadata(&exact).is_ok());

        let over = "x".repeat(MAX_FILENAME_LEN + 1);
        assert!(matches!(
            encode_metadata(&over),
            Err(SealError::FilenameTooLong { len: 127, max: 126 })
        ));
    }

    #[test]
    fn test_filename_limit_counts_utf8_bytes() {
        // 42 chars, 126 bytes
        let fits = "日".repeat(42);
        assert!(encode_metadata(&fits).is_ok());

        let over = "日".repeat(43);
        assert!(encode_metadata(&over).is_err());
    }

    #[test]
    fn test_extract_unicode_name() -> Result<()> {
        let metadata = encode_metadata("báo cáo 2024.pdf")?;
        assert_eq!(
            extract_filename(&metadata).as_deref(),
            Some("báo cáo 2024.pdf")
        );
        Ok(())
    }

    #[test]
    fn test_extract_oversized_prefix() {
        assert_eq!(extract_filename(&metadata_with_prefix(127, b"abc")), None);
        assert_eq!(extract_filename(&metadata_with_prefix(u16::MAX, b"abc")), None);
    }

    #[test]
    fn test_extract_invalid_utf8() {
        assert_eq!(extract_filename(&metadata_with_prefix(2, &[0xFF, 0xFE])), None);
    }

    #[test]
    fn test_extract_trims_padding_and_whitespace() {
        // Prefix covers trailing NULs and spaces
        let metadata = metadata_with_prefix(10, b" file.txt ");
        assert_eq!(extract_filename(&metadata).as_deref(), Some("file.txt"));

        let metadata = metadata_with_prefix(12, b"file.txt");
        assert_eq!(extract_filename(&metadata).as_deref(), Some("file.txt"));
    }

    #[test]
    fn test_extract_rejects_empty_and_embedded_nul() {
        assert_eq!(extract_filename(&[0u8; METADATA_LEN]), None);
        assert_eq!(extract_filename(&metadata_with_prefix(3, b"   ")), None);
        assert_eq!(extract_filename(&metadata_with_prefix(5, b"ab\0cd")), None);
    }

    #[test]
    fn test_encrypted_name() {
        assert_eq!(encrypted_name("photo.jpg"), "photo.jpg.encrypted");
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(fallback_name("photo.jpg.encrypted"), "photo.jpg");
        assert_eq!(fallback_name("blob.bin"), "blob.bin");
        assert!(fallback_name(".encrypted").starts_with("decrypted_"));
    }
}
