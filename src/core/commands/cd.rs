use std::env;
use std::io::Write;

use super::{expand_home, home_dir, CommandError};
use crate::shell::Shell;

pub(super) fn cd(shell: &mut Shell, args: &[String]) -> Result<i32, CommandError> {
    let back = args.first().is_some_and(|arg| arg == "-");
    let target = match args.first().map(String::as_str) {
        None => home_dir(shell)?,
        Some("-") => shell
            .env
            .lookup("OLDPWD")
            .map(Into::into)
            .ok_or_else(|| CommandError::ExecutionError("OLDPWD not set".to_string()))?,
        Some(path) => expand_home(shell, path)?,
    };

    let previous = env::current_dir().ok();
    env::set_current_dir(&target).map_err(|_| {
        CommandError::ExecutionError(format!("can't cd to {}", target.display()))
    })?;
    let current = env::current_dir()?;

    if let Some(previous) = previous {
        shell.set_env("OLDPWD", &previous.to_string_lossy())?;
    }
    shell.set_env("PWD", &current.to_string_lossy())?;

    if back {
        writeln!(shell.out, "{}", current.display())?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::test_shell;

    // cwd is process-wide, so every directory change lives in this one test
    #[test]
    fn test_cd_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let (mut shell, out, _) = test_shell();
        let home = tempfile::tempdir()?;
        let other = tempfile::tempdir()?;
        let home_path = home.path().canonicalize()?;
        let other_path = other.path().canonicalize()?;
        shell.set_env("HOME", &home_path.to_string_lossy())?;

        assert_eq!(cd(&mut shell, &[])?, 0);
        assert_eq!(env::current_dir()?, home_path);
        assert_eq!(shell.env().lookup("PWD"), Some(&*home_path.to_string_lossy()));

        cd(&mut shell, &[other_path.to_string_lossy().into_owned()])?;
        assert_eq!(env::current_dir()?, other_path);
        assert_eq!(shell.env().lookup("OLDPWD"), Some(&*home_path.to_string_lossy()));

        cd(&mut shell, &["-".to_string()])?;
        assert_eq!(env::current_dir()?, home_path);
        assert_eq!(out.contents(), format!("{}\n", home_path.display()));

        let result = cd(&mut shell, &["/nonexistent/path".to_string()]);
        assert!(matches!(result, Err(CommandError::ExecutionError(ref msg)) if msg.contains("can't cd to")));
        assert_eq!(env::current_dir()?, home_path);

        env::set_current_dir(env::temp_dir())?;
        Ok(())
    }
}
