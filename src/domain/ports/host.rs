//! Host port - abstraction over the machine being hardened
//!
//! Actions never spawn processes or touch files directly; they go through
//! this trait so recipes can be exercised against an in-memory host.

use std::io;
use std::path::Path;

/// Captured result of a finished program
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit status as text (`exit status: 1`, `signal: 9`)
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            status: format!("exit status: {}", code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Case-insensitive search in stdout
    pub fn stdout_contains(&self, needle: &str) -> bool {
        self.stdout.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Abstract host interface
///
/// Implementations:
/// - `SystemHost` - runs real programs on this machine
/// - test doubles that script command output
pub trait Host {
    /// Run `program` with `args` and wait for it
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;

    /// Whether `program` can be found on `PATH`
    fn has_tool(&self, program: &str) -> bool;

    fn read(&self, path: &Path) -> io::Result<String>;

    /// Write `content` to `path`, creating parent directories
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}
