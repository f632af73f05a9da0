//! Common test utilities for archsecure CLI tests.
//!
//! `TestEnv` isolates config, catalog and log locations in temp directories
//! so a developer's own configuration never leaks into a test.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Result of running the archsecure binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated environment for one CLI invocation
pub struct TestEnv {
    pub root: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write `content` to `relative` and return the full path
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Log files written so far
    pub fn log_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.path("logs")) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_archsecure"))
            .args(args)
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("ARCHSECURE_LOG_DIR", self.path("logs"))
            .env("ARCHSECURE_TICK_MS", "0")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("ARCHSECURE_CATALOG")
            .env_remove("ARCHSECURE_COLOR")
            .stdin(Stdio::null())
            .output()
            .unwrap();
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Catalog whose only options have no registered action
#[allow(dead_code)]
pub const UNREGISTERED_CATALOG: &str = r#"
[[option]]
kind = "checkbox"
label = "Site policy"
description = "Local policy with no recipe."

[[option]]
kind = "checkbox"
label = "Unused"
"#;
