use std::io::Write;

use super::CommandError;
use crate::shell::Shell;

pub(super) fn help(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    if args.is_empty() {
        writeln!(shell.out, "{} builtins:", shell.program_name)?;
        for (_, summary) in shell.builtins.summaries() {
            writeln!(shell.out, "  {}", summary)?;
        }
        return Ok(0);
    }

    for name in args {
        let summary = shell.builtins.summary(name).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no help topics match `{}'", name))
        })?;
        writeln!(shell.out, "{}", summary)?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::test_shell;

    #[test]
    fn test_help_lists_builtins() -> Result<(), CommandError> {
        let (mut shell, out, _) = test_shell();
        help(&mut shell, &[])?;

        let text = out.contents();
        assert!(text.contains("cd [dir|-]"));
        assert!(text.contains("exit [n]"));
        Ok(())
    }

    #[test]
    fn test_help_single_topic() -> Result<(), CommandError> {
        let (mut shell, out, _) = test_shell();
        help(&mut shell, &["setenv".to_string()])?;
        assert_eq!(out.contents(), "setenv NAME VALUE: set a variable\n");
        Ok(())
    }

    #[test]
    fn test_help_unknown_topic() {
        let (mut shell, _, _) = test_shell();
        let result = help(&mut shell, &["frobnicate".to_string()]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }
}
