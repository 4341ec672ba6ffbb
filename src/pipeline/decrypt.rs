use super::{validate, DecryptedFile, FilenameSource, InputFile};
use crate::crypto::{container, derive_key, Encryptor};
use crate::error::Result;
use tracing::{debug, warn};

/// Open a container produced by [`super::encrypt`].
///
/// `file.name` is the container's own name; it only matters when the
/// stored filename cannot be recovered. A bad password and a corrupted
/// file both end in `SealError::AuthenticationFailed`.
pub fn decrypt(file: &InputFile<'_>, password: &str) -> Result<DecryptedFile> {
    validate(file, password)?;

    let parts = container::decode(file.bytes)?;

    let (filename, filename_source) = match container::extract_filename(parts.metadata) {
        Some(name) => (name, FilenameSource::Recovered),
        None => {
            let name = container::fallback_name(file.name);
            warn!(
                container = file.name,
                fallback = %name,
                "stored filename unreadable, using fallback"
            );
            (name, FilenameSource::Fallback)
        }
    };

    debug!(container = file.name, "deriving key");
    let key = derive_key(password.as_bytes(), &parts.salt);

    let bytes = Encryptor::new(&key).open(parts.sealed, &parts.nonce)?;
    debug!(container = file.name, size = bytes.len(), "opened");

    Ok(DecryptedFile {
        filename,
        bytes,
        filename_source,
    })
}
