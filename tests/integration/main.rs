//! Integration tests for deno-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    /// Runner and cache env vars the host may leak into the tests
    const AMBIENT_ENV: &[&str] = &[
        "DENO_CACHE_SERVICE",
        "DENO_CACHE_HASH",
        "DENO_DIR",
        "GITHUB_STATE",
        "GITHUB_OUTPUT",
        "GITHUB_JOB",
        "GITHUB_WORKSPACE",
        "RUNNER_OS",
        "STATE_DENO_DIR",
        "STATE_CACHE_SAVE",
        "STATE_CACHE_HIT",
    ];

    fn deno_cache() -> Command {
        let mut cmd = cargo_bin_cmd!("deno-cache");
        for var in AMBIENT_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    #[test]
    fn help_displays() {
        deno_cache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("dependency-directory caching"));
    }

    #[test]
    fn version_displays() {
        deno_cache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("deno-cache"));
    }

    #[test]
    fn restore_without_service_skips() {
        deno_cache()
            .args(["restore", "--hash", "abc123"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "::warning::Caching is not available",
            ));
    }

    #[test]
    fn save_without_service_skips() {
        deno_cache()
            .arg("save")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "::warning::Caching is not available",
            ));
    }

    #[test]
    fn save_without_state_not_enabled() {
        deno_cache()
            .arg("save")
            .env("DENO_CACHE_SERVICE", "definitely-not-a-cache-client")
            .assert()
            .success()
            .stdout(predicate::str::contains("Caching is not enabled"));
    }

    #[test]
    fn save_after_hit_skips_upload() {
        // The client binary does not exist; success proves it was never run.
        deno_cache()
            .arg("save")
            .env("DENO_CACHE_SERVICE", "definitely-not-a-cache-client")
            .env("STATE_DENO_DIR", "/tmp/x")
            .env("STATE_CACHE_SAVE", "deno-cache-Linux-x64-build-abc123")
            .env("STATE_CACHE_HIT", "true")
            .assert()
            .success()
            .stdout(predicate::str::contains("not saving cache"));
    }

    #[test]
    fn save_failure_fails_job_step() {
        deno_cache()
            .arg("save")
            .env("DENO_CACHE_SERVICE", "definitely-not-a-cache-client")
            .env("STATE_DENO_DIR", "/tmp/x")
            .env("STATE_CACHE_SAVE", "deno-cache-Linux-x64-build-abc123")
            .env("STATE_CACHE_HIT", "false")
            .assert()
            .failure()
            .stdout(predicate::str::contains("::error::"))
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn restore_degrades_when_resolution_fails() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("state");

        deno_cache()
            .args(["restore", "--hash", "abc123"])
            .args(["--deno-bin", "definitely-not-deno"])
            .env("DENO_CACHE_SERVICE", "definitely-not-a-cache-client")
            .env("GITHUB_STATE", &state_file)
            .assert()
            .success()
            .stdout(predicate::str::contains("::warning::Failed to restore cache"));

        // Resolution failed before any state was recorded
        assert!(!state_file.exists());
    }

    #[cfg(unix)]
    mod with_fake_client {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        /// Write a cache client stub that reports `restore` as an exact hit
        /// (echoes the requested key) and accepts `save`.
        fn write_client(dir: &Path) -> std::path::PathBuf {
            let path = dir.join("fake-cache-client");
            std::fs::write(
                &path,
                "#!/bin/sh\nif [ \"$1\" = restore ]; then echo \"$5\"; fi\n",
            )
            .unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn restore_records_exact_hit() {
            let dir = tempfile::tempdir().unwrap();
            let client = write_client(dir.path());
            let state_file = dir.path().join("state");
            let output_file = dir.path().join("output");

            deno_cache()
                .args(["restore", "--hash", "abc123"])
                .env("DENO_CACHE_SERVICE", &client)
                .env("DENO_DIR", dir.path().join("deno_dir"))
                .env("GITHUB_JOB", "build")
                .env("RUNNER_OS", "Linux")
                .env("GITHUB_STATE", &state_file)
                .env("GITHUB_OUTPUT", &output_file)
                .assert()
                .success()
                .stdout(predicate::str::contains("Cache key used"));

            let state = std::fs::read_to_string(&state_file).unwrap();
            assert!(state.contains("CACHE_HIT=true"));
            assert!(state.contains("CACHE_SAVE=deno-cache-Linux-"));

            let output = std::fs::read_to_string(&output_file).unwrap();
            assert!(output.contains("cache-hit=true"));
        }

        #[test]
        fn save_uploads_on_miss() {
            let dir = tempfile::tempdir().unwrap();
            let client = write_client(dir.path());

            deno_cache()
                .arg("save")
                .env("DENO_CACHE_SERVICE", &client)
                .env("STATE_DENO_DIR", "/tmp/x")
                .env("STATE_CACHE_SAVE", "deno-cache-Linux-x64-build-abc123")
                .env("STATE_CACHE_HIT", "false")
                .assert()
                .success()
                .stdout(predicate::str::contains(
                    "Cache saved with key: \"deno-cache-Linux-x64-build-abc123\"",
                ));
        }

        #[test]
        fn restore_falls_back_to_stdout_commands() {
            let dir = tempfile::tempdir().unwrap();
            let client = write_client(dir.path());

            // No GITHUB_STATE / GITHUB_OUTPUT: legacy workflow commands
            deno_cache()
                .args(["restore", "--hash", "abc123"])
                .env("DENO_CACHE_SERVICE", &client)
                .env("DENO_DIR", dir.path().join("deno_dir"))
                .assert()
                .success()
                .stdout(predicate::str::contains("::save-state name=CACHE_HIT::true"))
                .stdout(predicate::str::contains("::set-output name=cache-hit::true"));
        }
    }
}
