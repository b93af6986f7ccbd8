//! Cache key derivation
//!
//! The primary key pins OS, architecture, job id and lockfile hash; the
//! restore key drops the job and hash suffix and is used as a prefix
//! fallback when no exact entry exists.

/// Fixed prefix shared by every key this tool produces
pub const KEY_PREFIX: &str = "deno-cache";

/// Derived cache keys for one job run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    /// Exact key: `deno-cache-<OS>-<ARCH>-<JOB>-<HASH>`
    pub primary: String,
    /// Fallback prefix: `deno-cache-<OS>-<ARCH>`
    pub restore: String,
}

impl CacheKeys {
    /// Derive both keys from the run-environment facts and content hash.
    ///
    /// Pure function: equal inputs always produce identical key strings.
    pub fn derive(os: &str, arch: &str, job: &str, hash: &str) -> Self {
        let restore = format!("{KEY_PREFIX}-{os}-{arch}");
        // Jobs in one workflow often download different dependency sets,
        // so the job id is part of the primary key.
        let primary = format!("{restore}-{job}-{hash}");
        Self { primary, restore }
    }
}
