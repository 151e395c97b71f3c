use std::io::Write;

use super::CommandError;
use crate::shell::Shell;

#[derive(Debug, PartialEq, Eq)]
enum AliasArg {
    Show(String),
    Define(String, String),
}

/// Groups the words of an `alias` invocation. The tokenizer does not know
/// about quotes, so a quoted value such as `ll='ls -l'` arrives split in two
/// and is joined back here.
fn parse_args(args: &[String]) -> Result<Vec<AliasArg>, CommandError> {
    let mut parsed = Vec::new();
    let mut words = args.iter();

    while let Some(word) = words.next() {
        let Some((name, value)) = word.split_once('=') else {
            parsed.push(AliasArg::Show(word.clone()));
            continue;
        };
        if name.is_empty() {
            return Err(CommandError::InvalidArguments(format!(
                "{}: invalid alias name",
                word
            )));
        }

        let mut value = value.to_string();
        if let Some(quote) = value.chars().next().filter(|c| *c == '\'' || *c == '"') {
            while value.len() < 2 || !value.ends_with(quote) {
                match words.next() {
                    Some(next) => {
                        value.push(' ');
                        value.push_str(next);
                    }
                    None => break,
                }
            }
        }

        parsed.push(AliasArg::Define(name.to_string(), strip_quotes(&value).to_string()));
    }

    Ok(parsed)
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

pub(super) fn alias(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    if args.is_empty() {
        for (name, replacement) in shell.aliases.enumerate() {
            writeln!(shell.out, "{}='{}'", name, replacement)?;
        }
        return Ok(0);
    }

    let mut status = 0;
    for arg in parse_args(args)? {
        match arg {
            AliasArg::Define(name, value) if value.is_empty() => {
                shell.aliases.remove(&name);
            }
            AliasArg::Define(name, value) => shell.aliases.set(&name, &value),
            AliasArg::Show(name) => match shell.aliases.lookup(&name) {
                Some(replacement) => writeln!(shell.out, "{}='{}'", name, replacement)?,
                None => {
                    shell.diagnose("alias", format!("{}: not found", name));
                    status = 1;
                }
            },
        }
    }
    Ok(status)
}

pub(super) fn unalias(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: unalias name...".to_string(),
        ));
    }

    let mut status = 0;
    for name in args {
        if !shell.aliases.remove(name) {
            shell.diagnose("unalias", format!("{}: not found", name));
            status = 1;
        }
    }
    Ok(status)
}
