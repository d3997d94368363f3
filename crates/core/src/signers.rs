use crate::{error::KeyErrorKind, Result};
use alloy::signers::local::PrivateKeySigner;
use std::{path::Path, str::FromStr};
use tracing::info;

/// Loads newline-delimited private keys from a plaintext file. Blank lines
/// are skipped; a missing or effectively-empty file is fatal.
pub fn load_signers(path: impl AsRef<Path>) -> Result<Vec<PrivateKeySigner>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KeyErrorKind::FileMissing(path.to_path_buf()).into()
        } else {
            crate::error::Error::Io(e)
        }
    })?;

    let mut signers = vec![];
    for (idx, line) in raw.lines().enumerate() {
        let key = line.trim();
        if key.is_empty() {
            continue;
        }
        let signer = PrivateKeySigner::from_str(key)
            .map_err(|source| KeyErrorKind::InvalidKey { line: idx + 1, source })?;
        signers.push(signer);
    }
    if signers.is_empty() {
        return Err(KeyErrorKind::NoKeys(path.to_path_buf()).into());
    }

    info!("loaded {} signer(s) from {}", signers.len(), path.display());
    Ok(signers)
}
