//! Restore command - fetch the dependency directory from the cache
//!
//! Resolves DENO_DIR, derives the cache keys, asks the cache service for a
//! matching entry and records directory, key and hit outcome in cross-step
//! state for the save command. Every failure in here is downgraded to a
//! warning: a cold run must still succeed.

use crate::cli::args::RestoreArgs;
use crate::error::{DenoCacheResult, StepOutcome};
use crate::github::RunnerContext;
use crate::hash::lockfile_hash;
use crate::keys::CacheKeys;
use crate::resolver::{resolve_deno_dir, DenoDirResolver, DenoInfoResolver, EnvResolver};
use crate::service::{create_service, CacheService};
use crate::state;
use tracing::debug;

/// Execute the restore command
pub async fn execute(args: RestoreArgs, ctx: &mut RunnerContext) -> DenoCacheResult<StepOutcome> {
    let service = create_service();
    let env_resolver = EnvResolver;
    let info_resolver = DenoInfoResolver::new(args.deno_bin.as_str());
    restore(&args, ctx, &*service, &[&env_resolver, &info_resolver]).await
}

/// Run the restore step against an injected service and resolver chain
pub async fn restore(
    args: &RestoreArgs,
    ctx: &mut RunnerContext,
    service: &dyn CacheService,
    resolvers: &[&dyn DenoDirResolver],
) -> DenoCacheResult<StepOutcome> {
    if !service.is_feature_available() {
        ctx.warning("Caching is not available. Caching is skipped.");
        return Ok(StepOutcome::Skipped);
    }

    match try_restore(args, ctx, service, resolvers).await {
        Ok(()) => Ok(StepOutcome::Completed),
        Err(e) => {
            ctx.warning(&format!("Failed to restore cache. Continuing without cache: {e}"));
            Ok(StepOutcome::Degraded)
        }
    }
}

async fn try_restore(
    args: &RestoreArgs,
    ctx: &mut RunnerContext,
    service: &dyn CacheService,
    resolvers: &[&dyn DenoDirResolver],
) -> DenoCacheResult<()> {
    let deno_dir = resolve_deno_dir(resolvers).await?;
    ctx.save_state(state::DENO_DIR, &deno_dir.display().to_string())?;

    let hash = match &args.hash {
        Some(hash) => hash.clone(),
        None => lockfile_hash(&ctx.workspace)?,
    };

    let keys = CacheKeys::derive(&ctx.os, &ctx.arch, &ctx.job, &hash);
    debug!("Primary key: {}", keys.primary);
    ctx.save_state(state::CACHE_SAVE, &keys.primary)?;

    let matched = service
        .restore(
            std::slice::from_ref(&deno_dir),
            &keys.primary,
            std::slice::from_ref(&keys.restore),
        )
        .await?;

    let hit = matched.as_deref() == Some(keys.primary.as_str());
    let hit_str = if hit { "true" } else { "false" };
    ctx.set_output("cache-hit", hit_str)?;
    ctx.save_state(state::CACHE_HIT, hit_str)?;

    match matched {
        Some(key) => ctx.info(&format!("Cache key used: \"{key}\".")),
        None => ctx.info(&format!(
            "No cache found for restore key: \"{}\".",
            keys.restore
        )),
    }

    Ok(())
}
