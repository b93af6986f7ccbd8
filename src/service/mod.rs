//! External cache service boundary
//!
//! Storage, compression and transport live behind this trait; this crate
//! only computes keys and records state. The production implementation
//! bridges to an external cache client binary.

pub mod external;

pub use external::ExternalCacheCli;

use crate::error::DenoCacheResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// Contract with the external cache service
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Whether caching is available on this host at all
    fn is_feature_available(&self) -> bool;

    /// Fetch the best matching entry into `paths`.
    ///
    /// Tries `primary_key` exactly, then each of `restore_keys` as a prefix
    /// match. Returns the key that actually matched, or `None`.
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary_key: &str,
        restore_keys: &[String],
    ) -> DenoCacheResult<Option<String>>;

    /// Upload `paths` under `key`
    async fn save(&self, paths: &[PathBuf], key: &str) -> DenoCacheResult<()>;
}

/// Create the cache service for this environment
pub fn create_service() -> Box<dyn CacheService> {
    Box::new(ExternalCacheCli::from_env())
}
