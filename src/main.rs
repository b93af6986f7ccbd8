//! deno-cache - CI caching for the Deno dependency directory
//!
//! CLI entry point that dispatches to the restore and save steps.

use clap::Parser;
use console::style;
use deno_cache::cli::{Cli, Commands};
use deno_cache::error::StepOutcome;
use deno_cache::github::{self, RunnerContext};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Attach the error to the step as its failure reason
            github::issue_error(&e.to_string());
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> deno_cache::DenoCacheResult<StepOutcome> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("deno_cache=warn"),
        1 => EnvFilter::new("deno_cache=info"),
        _ => EnvFilter::new("deno_cache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = RunnerContext::from_env();

    match cli.command {
        Commands::Restore(args) => deno_cache::cli::commands::restore(args, &mut ctx).await,
        Commands::Save => deno_cache::cli::commands::save(&ctx).await,
    }
}
