//! GitHub Actions runner interface
//!
//! The thin slice of the runner contract this tool needs: run-environment
//! facts, cross-step state (written to `$GITHUB_STATE`, read back from
//! `STATE_<name>` env vars), step outputs (`$GITHUB_OUTPUT`) and
//! workflow-command annotations.
//!
//! The context is built once from the environment and injected into both
//! entry points; nothing below this module touches ambient globals.

use crate::error::{DenoCacheError, DenoCacheResult};
use std::collections::BTreeMap;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything the restore and save steps need from the host runner
#[derive(Debug, Clone)]
pub struct RunnerContext {
    /// Runner operating system (`RUNNER_OS`: Linux, macOS, Windows)
    pub os: String,

    /// CPU architecture in runner naming (x64, arm64)
    pub arch: String,

    /// CI job identifier (`GITHUB_JOB`)
    pub job: String,

    /// Checked-out workspace root (`GITHUB_WORKSPACE`)
    pub workspace: PathBuf,

    /// File receiving cross-step state writes (`GITHUB_STATE`)
    pub state_path: Option<PathBuf>,

    /// File receiving step outputs (`GITHUB_OUTPUT`)
    pub output_path: Option<PathBuf>,

    /// Cross-step state visible to this step (`STATE_*` env vars)
    pub state: BTreeMap<String, String>,
}

impl RunnerContext {
    /// Build the context from the process environment.
    ///
    /// Outside GitHub Actions the facts fall back to host values so the
    /// tool stays usable in other CI systems that set the same contract.
    pub fn from_env() -> Self {
        let state = env::vars()
            .filter_map(|(k, v)| k.strip_prefix("STATE_").map(|name| (name.to_string(), v)))
            .collect();

        Self {
            os: env::var("RUNNER_OS").unwrap_or_else(|_| host_runner_os().to_string()),
            arch: runner_arch().to_string(),
            job: env::var("GITHUB_JOB").unwrap_or_else(|_| "default".to_string()),
            workspace: env::var_os("GITHUB_WORKSPACE")
                .map(PathBuf::from)
                .or_else(|| env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            state_path: env::var_os("GITHUB_STATE").map(PathBuf::from),
            output_path: env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            state,
        }
    }

    /// Read a cross-step state value persisted by an earlier step
    pub fn state(&self, name: &str) -> &str {
        self.state.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Persist a cross-step state value for a later step
    pub fn save_state(&mut self, name: &str, value: &str) -> DenoCacheResult<()> {
        debug!("Saving state {}={}", name, value);
        write_command_value(self.state_path.as_deref(), "save-state", name, value)?;
        self.state.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Emit a step output consumable by later steps in the same job
    pub fn set_output(&self, name: &str, value: &str) -> DenoCacheResult<()> {
        debug!("Setting output {}={}", name, value);
        write_command_value(self.output_path.as_deref(), "set-output", name, value)
    }

    /// Plain informational log line
    pub fn info(&self, message: &str) {
        println!("{message}");
    }

    /// Warning annotation surfaced in the job summary
    pub fn warning(&self, message: &str) {
        println!("::warning::{}", escape_data(message));
    }
}

/// Error annotation surfaced as the step's failure reason
pub fn issue_error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Append `name=value` to a runner command file, falling back to the
/// legacy stdout workflow command when the file env var is absent.
fn write_command_value(
    path: Option<&Path>,
    command: &str,
    name: &str,
    value: &str,
) -> DenoCacheResult<()> {
    // The `name=value` file format cannot carry newlines; every value this
    // tool writes is a single-line path, key or boolean.
    if value.contains('\n') || value.contains('\r') {
        return Err(DenoCacheError::MultilineValue(name.to_string()));
    }

    match path {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    DenoCacheError::io(format!("opening runner file {}", path.display()), e)
                })?;
            writeln!(file, "{name}={value}").map_err(|e| {
                DenoCacheError::io(format!("writing runner file {}", path.display()), e)
            })?;
        }
        None => println!("::{command} name={}::{}", name, escape_data(value)),
    }
    Ok(())
}

/// Map the host OS to the runner's naming when `RUNNER_OS` is unset
fn host_runner_os() -> &'static str {
    match env::consts::OS {
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        other => other,
    }
}

/// CPU architecture in the runner's naming scheme
pub fn runner_arch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        other => other,
    }
}

/// Escape workflow-command data per the runner's rules
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
