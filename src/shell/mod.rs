pub mod chain;
mod executor;
pub mod substitution;
pub mod tokenizer;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Write};

use crate::core::alias::AliasStore;
use crate::core::commands::BuiltinTable;
use crate::core::config::{ConfigError, ConfigLoader, ConfigPaths};
use crate::core::env::{EnvError, EnvStore};
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::SyntaxHighlighter;
use crate::input::history::HISTORY_MAX;
use crate::input::{EditorSource, History, InputSource, ReaderSource};
use crate::process::signal::{self, Termination};

/// One interpreter session: stores, state and the output streams builtins
/// and diagnostics write to.
pub struct Shell {
    pub(crate) state: ShellState,
    pub(crate) env: EnvStore,
    pub(crate) aliases: AliasStore,
    pub(crate) history: History,
    pub(crate) builtins: BuiltinTable,
    pub(crate) program_name: String,
    pub(crate) delimiters: Vec<char>,
    pub(crate) out: Box<dyn Write>,
    pub(crate) err: Box<dyn Write>,
    /// Files currently being read by `source`.
    pub(crate) source_depth: usize,
    highlighter: Option<SyntaxHighlighter>,
    termination: Option<Termination>,
}

impl Shell {
    /// A session seeded from the process environment.
    pub fn new(program_name: &str) -> Self {
        Self::with_env(program_name, EnvStore::from_process())
    }

    pub fn with_env(program_name: &str, env: EnvStore) -> Self {
        Shell {
            state: ShellState::new(),
            env,
            aliases: AliasStore::new(),
            history: History::default(),
            builtins: BuiltinTable::with_defaults(),
            program_name: program_name.to_string(),
            delimiters: tokenizer::DEFAULT_DELIMITERS.to_vec(),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            source_depth: 0,
            highlighter: None,
            termination: None,
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Interactive sessions colour their diagnostics.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.highlighter = interactive.then(SyntaxHighlighter::new);
        self
    }

    pub fn status(&self) -> i32 {
        self.state.status
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn env(&self) -> &EnvStore {
        &self.env
    }

    pub fn aliases(&self) -> &AliasStore {
        &self.aliases
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn set_env(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        self.env.set(name, value)?;
        self.state.env_changed = true;
        Ok(())
    }

    pub fn unset_env(&mut self, name: &str) -> bool {
        let removed = self.env.unset(name);
        if removed {
            self.state.env_changed = true;
        }
        removed
    }

    /// Applies the rc file named by `paths` to the stores.
    pub fn load_config(&mut self, paths: &ConfigPaths) -> Result<(), ConfigError> {
        let result = ConfigLoader::new(paths).load_into(&mut self.env, &mut self.aliases);
        self.state.env_changed = true;
        result
    }

    /// Writes `PROGRAM: LINE: COMMAND: MESSAGE` to the error stream. A failed
    /// write is logged and otherwise ignored.
    pub fn diagnose(&mut self, command: &str, message: impl fmt::Display) {
        self.state.err_count += 1;
        let text = format!(
            "{}: {}: {}: {}",
            self.program_name, self.state.line_count, command, message
        );
        let text = match &self.highlighter {
            Some(highlighter) => highlighter.highlight_error(&text),
            None => text,
        };
        if let Err(e) = writeln!(self.err, "{}", text) {
            tracing::warn!(command, "cannot write diagnostic: {}", e);
        }
    }

    /// `NAME=VALUE` strings handed to children, rebuilt only after a change.
    pub(crate) fn exported_env(&mut self) -> &[String] {
        if self.state.env_changed {
            self.state.sync_environ(self.env.snapshot());
        }
        self.state.environ()
    }

    /// Reads and executes lines until end of input, `exit` or a termination
    /// signal. Returns the session's final status.
    pub fn run<I: InputSource>(&mut self, input: &mut I) -> Result<i32, ShellError> {
        loop {
            if let Some(signal) = self.termination.as_ref().and_then(Termination::pending) {
                tracing::debug!(signal, "terminating on signal");
                self.state.status = 128 + signal;
                break;
            }

            let Some(line) = input.next_line()? else {
                break;
            };
            if !line.trim().is_empty() {
                self.history.push(&line);
            }

            match self.execute_line(&line) {
                Ok(()) => {}
                Err(ShellError::Exit(code)) => {
                    self.state.status = code;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        self.out.flush()?;
        tracing::debug!(
            status = self.state.status,
            lines = self.state.line_count,
            errors = self.state.err_count,
            "session finished"
        );
        Ok(self.state.status)
    }

    /// Sets up a session from command-line flags, runs it, and returns the
    /// final status.
    pub fn launch(program_name: &str, flags: &Flags) -> Result<i32, ShellError> {
        let termination = Termination::install()?;
        let mut shell = Shell::new(program_name).with_termination(termination);

        let paths = match ConfigPaths::new() {
            Ok(paths) => Some(paths),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };
        let rc_paths = match (&flags.config, &paths) {
            (Some(rc), Some(paths)) => Some(paths.clone().with_rc(rc.clone())),
            (Some(rc), None) => Some(ConfigPaths::under(&std::env::temp_dir()).with_rc(rc.clone())),
            (None, paths) => paths.clone(),
        };
        if let (false, Some(rc_paths)) = (flags.norc, &rc_paths) {
            if let Err(e) = shell.load_config(rc_paths) {
                writeln!(shell.err, "{}: {}", shell.program_name, e)?;
            }
        }

        let interactive =
            flags.command.is_none() && flags.script.is_none() && io::stdin().is_terminal();

        let status = if let Some(command) = &flags.command {
            shell.run(&mut ReaderSource::new(Cursor::new(command.clone())))?
        } else if let Some(script) = &flags.script {
            let file = File::open(script).map_err(|source| ShellError::Script {
                path: script.display().to_string(),
                source,
            })?;
            shell.run(&mut ReaderSource::new(BufReader::new(file)))?
        } else if interactive {
            signal::install_interrupt_handler()?;
            if let Some(paths) = &paths {
                match History::load(paths.history_path.clone(), HISTORY_MAX) {
                    Ok(history) => shell = shell.with_history(history),
                    Err(e) => tracing::warn!(path = %paths.history_path.display(), "cannot load history: {}", e),
                }
            }
            shell = shell.interactive(true);
            let mut source = EditorSource::new(flags.quiet)?;
            shell.run(&mut source)?
        } else {
            shell.run(&mut ReaderSource::new(io::stdin().lock()))?
        };

        if let Err(e) = shell.history.save() {
            tracing::warn!("cannot save history: {}", e);
        }
        Ok(status)
    }
}
