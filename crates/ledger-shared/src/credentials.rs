//! Credential file loading

use std::path::Path;

use crate::error::AppError;

/// Read a secret (client secret, signing key) from disk.
///
/// Trailing whitespace is stripped so files written with a final newline work
/// as-is. An empty path, an unreadable file or a blank file is an error; the
/// binary treats all three as fatal at startup.
pub fn read_secret_file(path: impl AsRef<Path>) -> Result<String, AppError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(AppError::EmptyCredentialPath);
    }

    let contents = std::fs::read_to_string(path).map_err(|source| AppError::CredentialRead {
        path: path.display().to_string(),
        source,
    })?;

    let secret = contents.trim_end();
    if secret.is_empty() {
        return Err(AppError::EmptyCredential(path.display().to_string()));
    }

    Ok(secret.to_string())
}
