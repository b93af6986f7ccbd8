//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};

/// deno-cache - dependency-directory caching for Deno CI jobs
///
/// Run `restore` at the start of a job and `save` at the end; all other
/// input arrives through the runner environment.
#[derive(Parser, Debug)]
#[command(name = "deno-cache")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restore the dependency directory from the cache service
    Restore(RestoreArgs),

    /// Save the dependency directory back to the cache service
    Save,
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Content hash summarizing lockfile state
    /// (defaults to hashing deno.lock in the workspace)
    #[arg(long, env = "DENO_CACHE_HASH")]
    pub hash: Option<String>,

    /// Deno executable used for `deno info --json` introspection
    #[arg(long, default_value = "deno")]
    pub deno_bin: String,
}
