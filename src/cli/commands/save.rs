//! Save command - upload the dependency directory to the cache
//!
//! Reads the state the restore command left behind and uploads the
//! directory under the recorded primary key, unless restore already found
//! an exact match. Unlike restore, a failure here propagates and fails the
//! job step: a silently lost cache update would only surface as a cold
//! cache in some future run.

use crate::error::{DenoCacheResult, StepOutcome};
use crate::github::RunnerContext;
use crate::service::{create_service, CacheService};
use crate::state::CacheState;
use std::path::PathBuf;

/// Execute the save command
pub async fn execute(ctx: &RunnerContext) -> DenoCacheResult<StepOutcome> {
    let service = create_service();
    save(ctx, &*service).await
}

/// Run the save step against an injected service
pub async fn save(ctx: &RunnerContext, service: &dyn CacheService) -> DenoCacheResult<StepOutcome> {
    if !service.is_feature_available() {
        ctx.warning("Caching is not available. Caching is skipped.");
        return Ok(StepOutcome::Skipped);
    }

    let state = CacheState::load(ctx);

    if !state.enabled() {
        ctx.info("Caching is not enabled. Caching is skipped.");
        return Ok(StepOutcome::Skipped);
    }

    if state.hit() {
        ctx.info(&format!(
            "Cache hit occurred on the primary key \"{}\", not saving cache.",
            state.save_key
        ));
        return Ok(StepOutcome::Skipped);
    }

    service
        .save(&[PathBuf::from(&state.deno_dir)], &state.save_key)
        .await?;
    ctx.info(&format!("Cache saved with key: \"{}\".", state.save_key));

    Ok(StepOutcome::Completed)
}
