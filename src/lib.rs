//! deno-cache - CI caching for the Deno dependency directory
//!
//! Restores a previously saved DENO_DIR keyed by a lockfile hash and job
//! identity at the start of a run, and saves it back at the end unless the
//! restore already hit the exact key.

pub mod cli;
pub mod error;
pub mod github;
pub mod hash;
pub mod keys;
pub mod resolver;
pub mod service;
pub mod state;

pub use error::{DenoCacheError, DenoCacheResult, StepOutcome};
