//! In-memory host for exercising recipes
//!
//! Commands are answered from a script keyed by the full command line; an
//! unscripted command succeeds with empty output. Every command line is
//! recorded in order.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::ports::{CommandOutput, Host};

#[derive(Debug, Default)]
pub struct ScriptedHost {
    tools: HashSet<String>,
    responses: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
    log: RefCell<Vec<String>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, program: &str) -> Self {
        self.tools.insert(program.to_string());
        self
    }

    pub fn with_tools(mut self, programs: &[&str]) -> Self {
        self.tools.extend(programs.iter().map(|p| p.to_string()));
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.into(), content.to_string());
        self
    }

    /// Queue `output` for `command_line`. The last queued answer repeats.
    pub fn respond(self, command_line: &str, output: CommandOutput) -> Self {
        self.responses
            .borrow_mut()
            .entry(command_line.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// Command lines run so far
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn ran(&self, command_line: &str) -> bool {
        self.log.borrow().iter().any(|c| c == command_line)
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl Host for ScriptedHost {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.log.borrow_mut().push(line.clone());

        let mut responses = self.responses.borrow_mut();
        let output = match responses.get_mut(&line) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(output.unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn has_tool(&self, program: &str) -> bool {
        self.tools.contains(program)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}
