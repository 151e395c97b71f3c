pub mod history;

pub use history::{History, HistoryEntry};

use std::env;
use std::io::BufRead;

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

/// Supplies one logical line per call, or `None` at end of input.
pub trait InputSource {
    fn next_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// Interactive line editor.
pub struct EditorSource {
    editor: DefaultEditor,
    quiet: bool,
}

impl EditorSource {
    pub fn new(quiet: bool) -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;
        editor.set_auto_add_history(true);
        Ok(Self { editor, quiet })
    }

    fn prompt(&self) -> String {
        let current_dir = env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{} > ", current_dir)
    }
}

impl InputSource for EditorSource {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => return Ok(Some(line)),
                // Ctrl-C drops the line being typed
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    if !self.quiet {
                        println!("exit");
                    }
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Lines from a script, a `-c` string or a non-terminal stdin.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        // invalid UTF-8 is replaced rather than ending the session
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}
