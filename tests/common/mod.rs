//! Shared testing utilities for promptline CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the working directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Absolute path to a file inside the working directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Build a command for invoking the compiled `promptline` binary.
    ///
    /// Credentials and base-URL overrides are scrubbed so each test supplies
    /// exactly the environment it needs.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("promptline").expect("Failed to locate promptline binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("GEMINI_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("PROMPTLINE_BASE_URL");
        cmd
    }

    /// Write a `promptline.toml` into the working directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.path("promptline.toml"), content).expect("Failed to write config file");
    }
}
