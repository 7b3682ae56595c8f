use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::error::ModelError;

pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>, ModelError> {
    fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the lowercase hex SHA-256 digest of the file at `path`.
pub fn sha256_file(path: &Path) -> Result<String, ModelError> {
    let bytes = read_artifact(path)?;
    log::debug!("Read {} bytes from {:?}", bytes.len(), path);
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Fails with [`ModelError::HashMismatch`] unless the file matches the
/// expected hex digest (case-insensitive).
pub fn ensure_verified(path: &Path, expected_hash: &str) -> Result<(), ModelError> {
    let actual = sha256_file(path)?;
    if actual.eq_ignore_ascii_case(expected_hash.trim()) {
        log::info!("Model file {:?} verified successfully", path);
        Ok(())
    } else {
        log::error!("Hash mismatch for {:?}: expected {}, got {}", path, expected_hash, actual);
        Err(ModelError::HashMismatch {
            path: path.to_path_buf(),
            expected: expected_hash.trim().to_string(),
            actual,
        })
    }
}
