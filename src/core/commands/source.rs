use std::fs;

use super::{expand_home, CommandError};
use crate::error::ShellError;
use crate::shell::Shell;

/// Deepest chain of `source` calls before the innermost one is refused.
const MAX_SOURCE_DEPTH: usize = 64;

pub(super) fn source(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let Some(file) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: source FILE".to_string(),
        ));
    };
    if shell.source_depth >= MAX_SOURCE_DEPTH {
        return Err(CommandError::ExecutionError(format!(
            "{}: maximum nesting depth exceeded",
            file
        )));
    }

    let path = expand_home(shell, file)?;
    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::ExecutionError(format!("{}: {}", file, e)))?;

    shell.source_depth += 1;
    let result = run_lines(shell, &content);
    shell.source_depth -= 1;
    result
}

fn run_lines(shell: &mut Shell, content: &str) -> Result<i32, CommandError> {
    for line in content.lines() {
        match shell.execute_line(line) {
            Ok(()) => {}
            Err(ShellError::Exit(code)) => return Err(CommandError::Exit(code)),
            Err(e) => return Err(CommandError::ExecutionError(e.to_string())),
        }
    }

    Ok(shell.state.status)
}
