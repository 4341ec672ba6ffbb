use super::{validate, EncryptedFile, InputFile};
use crate::crypto::{container, derive_key, generate_nonce, generate_salt, Encryptor};
use crate::error::Result;
use tracing::debug;

/// Encrypt `file` with `password` into a new container.
///
/// Fresh salt and nonce are drawn for every call. Nothing is returned
/// unless every step succeeds.
pub fn encrypt(file: &InputFile<'_>, password: &str) -> Result<EncryptedFile> {
    validate(file, password)?;
    // Oversized names fail here, before the KDF
    let metadata = container::encode_metadata(file.name)?;

    let salt = generate_salt();
    let nonce = generate_nonce();

    debug!(file = file.name, size = file.bytes.len(), "deriving key");
    let key = derive_key(password.as_bytes(), &salt);

    let sealed = Encryptor::new(&key).seal(file.bytes, &nonce)?;
    let bytes = container::assemble(&salt, &nonce, &metadata, &sealed);
    debug!(file = file.name, container_size = bytes.len(), "sealed");

    Ok(EncryptedFile {
        filename: container::encrypted_name(file.name),
        bytes,
    })
}
