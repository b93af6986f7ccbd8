//! Cache client subprocess adapter
//!
//! Bridges [`CacheService`] to an external cache client binary named by the
//! `DENO_CACHE_SERVICE` environment variable. The client owns storage,
//! compression and transport; the wire contract is:
//!
//! ```text
//! <client> restore --path <dir> --key <primary> [--restore-key <k>]...
//!     prints the matched key on stdout, or nothing when no entry matched
//! <client> save --path <dir> --key <key>
//! ```
//!
//! A nonzero exit status from the client is an error.

use crate::error::{DenoCacheError, DenoCacheResult};
use crate::service::CacheService;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment variable naming the cache client binary
pub const SERVICE_ENV: &str = "DENO_CACHE_SERVICE";

/// Cache service implementation shelling out to an external client
pub struct ExternalCacheCli {
    client: Option<String>,
}

impl ExternalCacheCli {
    /// Read the client binary name from the environment
    pub fn from_env() -> Self {
        Self {
            client: std::env::var(SERVICE_ENV).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Use an explicit client binary
    pub fn with_client(client: impl Into<String>) -> Self {
        Self {
            client: Some(client.into()),
        }
    }

    fn client(&self) -> DenoCacheResult<&str> {
        self.client
            .as_deref()
            .ok_or(DenoCacheError::ServiceNotConfigured)
    }

    /// Execute a client command and return the output
    async fn exec(&self, args: &[String]) -> DenoCacheResult<std::process::Output> {
        let client = self.client()?;
        debug!("Executing: {} {:?}", client, args);

        Command::new(client)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DenoCacheError::command_failed(format!("{client} {args:?}"), e))
    }
}

/// Build the restore invocation arguments
fn restore_args(paths: &[PathBuf], primary_key: &str, restore_keys: &[String]) -> Vec<String> {
    let mut args = vec!["restore".to_string()];
    for path in paths {
        args.push("--path".to_string());
        args.push(path.display().to_string());
    }
    args.push("--key".to_string());
    args.push(primary_key.to_string());
    for key in restore_keys {
        args.push("--restore-key".to_string());
        args.push(key.clone());
    }
    args
}

/// Build the save invocation arguments
fn save_args(paths: &[PathBuf], key: &str) -> Vec<String> {
    let mut args = vec!["save".to_string()];
    for path in paths {
        args.push("--path".to_string());
        args.push(path.display().to_string());
    }
    args.push("--key".to_string());
    args.push(key.to_string());
    args
}

#[async_trait]
impl CacheService for ExternalCacheCli {
    fn is_feature_available(&self) -> bool {
        self.client.is_some()
    }

    async fn restore(
        &self,
        paths: &[PathBuf],
        primary_key: &str,
        restore_keys: &[String],
    ) -> DenoCacheResult<Option<String>> {
        let output = self.exec(&restore_args(paths, primary_key, restore_keys)).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DenoCacheError::CacheRestore {
                key: primary_key.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        let matched = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!matched.is_empty()).then_some(matched))
    }

    async fn save(&self, paths: &[PathBuf], key: &str) -> DenoCacheResult<()> {
        let output = self.exec(&save_args(paths, key)).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DenoCacheError::CacheSave {
                key: key.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
