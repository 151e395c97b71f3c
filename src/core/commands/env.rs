use std::io::Write;

use super::CommandError;
use crate::shell::Shell;

pub(super) fn env(shell: &mut Shell, _args: &[String]) -> Result<i32, CommandError> {
    for (name, value) in shell.env.iter() {
        writeln!(shell.out, "{}={}", name, value)?;
    }
    Ok(0)
}

pub(super) fn getenv(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let [name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: getenv NAME".to_string(),
        ));
    };

    match shell.env.lookup(name) {
        Some(value) => {
            writeln!(shell.out, "{}", value)?;
            Ok(0)
        }
        None => Err(CommandError::ExecutionError(format!("{}: not set", name))),
    }
}

pub(super) fn setenv(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let [name, value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: setenv NAME VALUE".to_string(),
        ));
    };

    shell.set_env(name, value)?;
    Ok(0)
}

pub(super) fn unsetenv(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: unsetenv NAME...".to_string(),
        ));
    }

    for name in args {
        shell.unset_env(name);
    }
    Ok(0)
}

pub(super) fn export(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: export NAME=VALUE".to_string(),
        ));
    }

    let (name, value) = parse_export(args)?;
    shell.set_env(name, &value)?;
    Ok(0)
}

/// `NAME=VALUE` where the value may be quoted and may have been split by the
/// tokenizer.
fn parse_export(args: &[String]) -> Result<(&str, String), CommandError> {
    let (name, first) = args[0].split_once('=').ok_or_else(|| {
        CommandError::InvalidArguments("usage: export NAME=VALUE".to_string())
    })?;
    let name = name.trim();

    if name.is_empty() {
        return Err(CommandError::InvalidArguments(
            "variable name cannot be empty".to_string(),
        ));
    }

    let mut value = first.to_string();
    for rest in &args[1..] {
        value.push(' ');
        value.push_str(rest);
    }

    let value = if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_owned()
    } else {
        value
    };

    Ok((name, value))
}
