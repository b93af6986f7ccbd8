//! DENO_DIR resolution
//!
//! Two sources for the dependency directory: an explicit `DENO_DIR`
//! environment override, or `deno info --json` introspection. Both sit
//! behind a trait so the restore step can be tested with a fake resolver.

use crate::error::{DenoCacheError, DenoCacheResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A single source for the DENO_DIR path
///
/// `resolve` returns `Ok(None)` when the source has nothing to offer so the
/// next resolver in the chain gets a chance, and an error only when the
/// source was consulted and failed.
#[async_trait]
pub trait DenoDirResolver: Send + Sync {
    async fn resolve(&self) -> DenoCacheResult<Option<PathBuf>>;
}

/// Resolver backed by the `DENO_DIR` environment variable
pub struct EnvResolver;

#[async_trait]
impl DenoDirResolver for EnvResolver {
    async fn resolve(&self) -> DenoCacheResult<Option<PathBuf>> {
        match std::env::var_os("DENO_DIR") {
            Some(dir) if !dir.is_empty() => {
                debug!("DENO_DIR taken from environment");
                Ok(Some(PathBuf::from(dir)))
            }
            _ => Ok(None),
        }
    }
}

/// Resolver that asks the Deno executable where its directory lives
pub struct DenoInfoResolver {
    deno_bin: String,
}

impl DenoInfoResolver {
    pub fn new(deno_bin: impl Into<String>) -> Self {
        Self {
            deno_bin: deno_bin.into(),
        }
    }
}

/// The slice of `deno info --json` output this tool cares about
#[derive(Debug, Deserialize)]
struct DenoInfo {
    #[serde(rename = "denoDir")]
    deno_dir: PathBuf,
}

#[async_trait]
impl DenoDirResolver for DenoInfoResolver {
    async fn resolve(&self) -> DenoCacheResult<Option<PathBuf>> {
        let command = format!("{} info --json", self.deno_bin);
        debug!("Executing: {}", command);

        let output = Command::new(&self.deno_bin)
            .args(["info", "--json"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DenoCacheError::DirResolution {
                reason: format!("{command}: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DenoCacheError::DirResolution {
                reason: format!("{command}: {}", stderr.trim()),
            });
        }

        let info: DenoInfo =
            serde_json::from_slice(&output.stdout).map_err(|e| DenoCacheError::DirResolution {
                reason: format!("unparsable `{command}` output: {e}"),
            })?;

        debug!("DENO_DIR from deno info: {}", info.deno_dir.display());
        Ok(Some(info.deno_dir))
    }
}

/// Walk the resolver chain and return the first directory offered.
///
/// Errors from a consulted resolver propagate; an exhausted chain is a
/// resolution error of its own.
pub async fn resolve_deno_dir(resolvers: &[&dyn DenoDirResolver]) -> DenoCacheResult<PathBuf> {
    for resolver in resolvers {
        if let Some(dir) = resolver.resolve().await? {
            return Ok(dir);
        }
    }

    Err(DenoCacheError::DirResolution {
        reason: "no resolver produced a directory".to_string(),
    })
}
