//! Error types for deno-cache
//!
//! All modules use `DenoCacheResult<T>` as their return type. Restore-path
//! errors are downgraded to warnings at the operation boundary; save-path
//! errors propagate to the process entry point.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for deno-cache operations
pub type DenoCacheResult<T> = Result<T, DenoCacheError>;

/// All errors that can occur in deno-cache
#[derive(Error, Debug)]
pub enum DenoCacheError {
    // Directory resolution errors
    #[error("Failed to resolve DENO_DIR: {reason}")]
    DirResolution { reason: String },

    // Cache service errors
    #[error("Cache service not configured")]
    ServiceNotConfigured,

    #[error("Cache restore failed for key {key}: {reason}")]
    CacheRestore { key: String, reason: String },

    #[error("Cache save failed for key {key}: {reason}")]
    CacheSave { key: String, reason: String },

    // Lockfile errors
    #[error("No lockfile found in {0} and no hash was supplied")]
    NoLockfile(PathBuf),

    #[error("Failed to read lockfile {path}: {reason}")]
    LockfileRead { path: String, reason: String },

    // Runner state errors
    #[error("Multi-line value rejected for state field {0}")]
    MultilineValue(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },
}

impl DenoCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ServiceNotConfigured => {
                Some("Set DENO_CACHE_SERVICE to your cache client binary")
            }
            Self::DirResolution { .. } => {
                Some("Set DENO_DIR explicitly or make sure `deno` is on PATH")
            }
            Self::NoLockfile(_) => Some("Pass --hash or commit a deno.lock"),
            _ => None,
        }
    }
}

/// How a step finished when it did not fail the job.
///
/// `main` maps every variant to a zero exit code; only an `Err` from the
/// save path fails the job step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step did everything it set out to do.
    Completed,
    /// The step had nothing to do (caching unavailable or not enabled).
    Skipped,
    /// The step hit an error that was downgraded to a warning.
    Degraded,
}
