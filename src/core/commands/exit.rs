use super::CommandError;
use crate::shell::Shell;

pub(super) fn exit(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let code = match args.first() {
        None => shell.state.status,
        Some(arg) => parse_exit_code(arg).ok_or_else(|| {
            CommandError::InvalidArguments(format!("{}: numeric argument required", arg))
        })?,
    };

    Err(CommandError::Exit(code & 0xff))
}

/// Accepts an optional `+` followed by decimal digits that fit an `i32`.
fn parse_exit_code(arg: &str) -> Option<i32> {
    let digits = arg.strip_prefix('+').unwrap_or(arg);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
