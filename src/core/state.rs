use std::path::{Path, PathBuf};

use crate::shell::chain::ChainOp;

/// Argument vector for one segment. Element 0 is the command word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Argv(Vec<String>);

impl Argv {
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    pub fn command(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the command word.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mutable per-session context.
#[derive(Debug, Default)]
pub struct ShellState {
    /// Raw text of the line being executed.
    pub line: String,
    argv: Option<Argv>,
    path: Option<PathBuf>,
    pub status: i32,
    pub line_count: usize,
    pub err_count: usize,
    pub chain: ChainOp,
    pub env_changed: bool,
    environ: Vec<String>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            // the first export has to build a snapshot
            env_changed: true,
            ..Self::default()
        }
    }

    pub fn begin_command(&mut self, argv: Argv) {
        self.argv = (!argv.is_empty()).then_some(argv);
        self.path = None;
    }

    /// Releases the argument vector and resolved path of the finished segment.
    pub fn end_command(&mut self) {
        self.argv = None;
        self.path = None;
    }

    pub fn argv(&self) -> Option<&Argv> {
        self.argv.as_ref()
    }

    pub fn take_argv(&mut self) -> Option<Argv> {
        self.argv.take()
    }

    pub fn argc(&self) -> usize {
        self.argv.as_ref().map_or(0, Argv::len)
    }

    pub fn command_word(&self) -> Option<&str> {
        self.argv.as_ref().and_then(Argv::command)
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn environ(&self) -> &[String] {
        &self.environ
    }

    pub fn sync_environ(&mut self, snapshot: Vec<String>) {
        self.environ = snapshot;
        self.env_changed = false;
    }
}
