//! Lockfile hashing
//!
//! Fallback used when the caller does not supply a content hash: hash the
//! workspace lockfile with SHA256. Same lockfile = same cache key.

use crate::error::{DenoCacheError, DenoCacheResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lockfile candidates in detection priority order
const LOCKFILE_PATTERNS: &[&str] = &["deno.lock", "deno.json", "deno.jsonc"];

/// Hash the first lockfile found in the workspace root.
///
/// Checks `deno.lock` first, then the config files that pin dependency
/// versions when no lockfile is committed.
pub fn lockfile_hash(workspace: &Path) -> DenoCacheResult<String> {
    for pattern in LOCKFILE_PATTERNS {
        let path = workspace.join(pattern);
        if path.exists() && path.is_file() {
            debug!("Hashing lockfile: {}", path.display());
            return hash_file_contents(&path);
        }
    }

    Err(DenoCacheError::NoLockfile(workspace.to_path_buf()))
}

/// Hash a file's contents using SHA256, returning first 12 hex chars
fn hash_file_contents(path: &Path) -> DenoCacheResult<String> {
    let contents = fs::read(path).map_err(|e| DenoCacheError::LockfileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let result = hasher.finalize();

    // Take first 12 hex characters (6 bytes)
    Ok(hex::encode(&result[..6]))
}
