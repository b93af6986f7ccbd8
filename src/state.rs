//! Cross-step cache state
//!
//! Three string fields written once by the restore step and read once by
//! the save step of the same job. The schema is declared here; reads and
//! writes go through [`RunnerContext`](crate::github::RunnerContext).

use crate::github::RunnerContext;

/// State field: resolved DENO_DIR path
pub const DENO_DIR: &str = "DENO_DIR";

/// State field: primary key the save step uploads under
pub const CACHE_SAVE: &str = "CACHE_SAVE";

/// State field: `"true"` when restore got an exact primary-key hit
pub const CACHE_HIT: &str = "CACHE_HIT";

/// Snapshot of the state the restore step left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheState {
    pub deno_dir: String,
    pub save_key: String,
    pub cache_hit: String,
}

impl CacheState {
    /// Load the snapshot from the runner context
    pub fn load(ctx: &RunnerContext) -> Self {
        Self {
            deno_dir: ctx.state(DENO_DIR).to_string(),
            save_key: ctx.state(CACHE_SAVE).to_string(),
            cache_hit: ctx.state(CACHE_HIT).to_string(),
        }
    }

    /// Caching was enabled only if restore recorded both dir and key
    pub fn enabled(&self) -> bool {
        !self.deno_dir.is_empty() && !self.save_key.is_empty()
    }

    /// Restore reported an exact primary-key hit
    pub fn hit(&self) -> bool {
        self.cache_hit == "true"
    }
}
