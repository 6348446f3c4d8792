//! Common test utilities for sextant integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't read or
//! pollute the user's `~/.config/sextant/` directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated config and data directories.
///
/// The `sx()` method returns a `Command` that sets `SX_CONFIG_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the sx binary with isolated config directory.
    pub fn sx(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sx"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("SX_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("SX_DATA");
        cmd.env_remove("SX_LOCALE");
        cmd
    }

    /// Write a dataset JSON file into the work directory and return its path.
    pub fn write_dataset(&self, name: &str, json: &serde_json::Value) -> PathBuf {
        let path = self.work_dir.path().join(name);
        std::fs::write(&path, json.to_string()).unwrap();
        path
    }

    /// Path inside the work directory.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
