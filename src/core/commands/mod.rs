use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

mod alias;
mod cd;
mod env;
mod exit;
mod help;
mod history;
mod source;

use crate::core::env::EnvError;
use crate::shell::Shell;

/// Status for a builtin invoked with bad arguments.
pub const STATUS_USAGE: i32 = 2;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    ExecutionError(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Env(#[from] EnvError),
    /// Ends the session with the given status.
    #[error("exit {0}")]
    Exit(i32),
}

impl CommandError {
    pub fn status(&self) -> i32 {
        match self {
            CommandError::InvalidArguments(_) | CommandError::Env(_) => STATUS_USAGE,
            CommandError::Exit(code) => *code,
            CommandError::ExecutionError(_) | CommandError::Io(_) => 1,
        }
    }
}

/// A builtin gets the session and the words after the command name, and
/// returns its exit status.
pub type BuiltinFn = fn(&mut Shell, &[String]) -> Result<i32, CommandError>;

#[derive(Clone, Copy)]
struct Builtin {
    handler: BuiltinFn,
    summary: &'static str,
}

#[derive(Clone, Default)]
pub struct BuiltinTable {
    commands: BTreeMap<&'static str, Builtin>,
}

impl BuiltinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("exit", exit::exit, "exit [n]: leave the shell with status n");
        table.register("cd", cd::cd, "cd [dir|-]: change the working directory");
        table.register("help", help::help, "help [name]: describe builtins");
        table.register("history", history::history, "history [n]: list entered lines");
        table.register("alias", alias::alias, "alias [name[='value']...]: define or list aliases");
        table.register("unalias", alias::unalias, "unalias name...: remove aliases");
        table.register("env", env::env, "env: list the environment");
        table.register("getenv", env::getenv, "getenv NAME: print a variable");
        table.register("setenv", env::setenv, "setenv NAME VALUE: set a variable");
        table.register("unsetenv", env::unsetenv, "unsetenv NAME...: remove variables");
        table.register("export", env::export, "export NAME=VALUE: set a variable");
        table.register("source", source::source, "source FILE: run the lines of FILE");
        table
    }

    pub fn register(&mut self, name: &'static str, handler: BuiltinFn, summary: &'static str) {
        self.commands.insert(name, Builtin { handler, summary });
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.commands.get(name).map(|builtin| builtin.handler)
    }

    pub fn summary(&self, name: &str) -> Option<&'static str> {
        self.commands.get(name).map(|builtin| builtin.summary)
    }

    pub fn summaries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.commands.iter().map(|(name, builtin)| (*name, builtin.summary))
    }
}

impl fmt::Debug for BuiltinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.commands.keys()).finish()
    }
}

/// Expands a leading `~` or `~/` against the session's `HOME`, falling back to
/// the user's home directory.
pub(crate) fn expand_home(shell: &Shell, path: &str) -> Result<PathBuf, CommandError> {
    match path.strip_prefix('~') {
        Some("") => home_dir(shell),
        Some(rest) if rest.starts_with('/') => {
            let mut home = home_dir(shell)?;
            for part in rest.split('/').filter(|part| !part.is_empty()) {
                home.push(part);
            }
            Ok(home)
        }
        // "~user" is not supported
        _ => Ok(PathBuf::from(path)),
    }
}

pub(crate) fn home_dir(shell: &Shell) -> Result<PathBuf, CommandError> {
    shell
        .env
        .lookup("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or_else(|| CommandError::ExecutionError("HOME not set".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::test_shell;

    #[test]
    fn test_builtin_command_detection() {
        let table = BuiltinTable::with_defaults();

        for name in [
            "exit", "cd", "help", "history", "alias", "unalias", "env", "getenv", "setenv",
            "unsetenv", "export", "source",
        ] {
            assert!(table.get(name).is_some(), "{} should be a builtin", name);
        }
        assert!(table.get("ls").is_none());
        assert!(table.get("").is_none());
    }

    #[test]
    fn test_command_error_status() {
        assert_eq!(CommandError::InvalidArguments("bad".into()).status(), 2);
        assert_eq!(CommandError::Env(EnvError::EmptyName).status(), 2);
        assert_eq!(CommandError::ExecutionError("failed".into()).status(), 1);
        assert_eq!(CommandError::Exit(7).status(), 7);
    }

    #[test]
    fn test_expand_home() -> Result<(), Box<dyn std::error::Error>> {
        let (mut shell, _, _) = test_shell();
        shell.set_env("HOME", "/home/test")?;

        assert_eq!(expand_home(&shell, "~")?, PathBuf::from("/home/test"));
        assert_eq!(expand_home(&shell, "~/a//b")?, PathBuf::from("/home/test/a/b"));
        assert_eq!(expand_home(&shell, "~user/x")?, PathBuf::from("~user/x"));
        assert_eq!(expand_home(&shell, "/tmp")?, PathBuf::from("/tmp"));
        Ok(())
    }
}
