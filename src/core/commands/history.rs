use std::io::Write;

use super::CommandError;
use crate::shell::Shell;

pub(super) fn history(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let count = match args {
        [] => shell.history.len(),
        [count] => count.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("{}: numeric argument required", count))
        })?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "too many arguments".to_string(),
            ))
        }
    };

    for entry in shell.history.recent(count) {
        writeln!(shell.out, "{:>5}  {}", entry.number, entry.command)?;
    }
    Ok(0)
}
