use std::path::Path;

use super::chain::{self, ChainParser};
use super::substitution::{self, VarScope};
use super::tokenizer::tokenize;
use super::Shell;
use crate::core::commands::{BuiltinFn, CommandError};
use crate::core::state::Argv;
use crate::error::ShellError;
use crate::process::{self, ChildGuard, Dispatch, STATUS_NOT_FOUND};

impl Shell {
    /// Executes one raw line: comment removal, chain splitting, and each
    /// segment whose operator allows it given the current status.
    pub fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        self.state.line_count += 1;
        self.state.line = line.to_owned();

        for segment in ChainParser::new(chain::strip_comment(line)) {
            if segment.is_blank() {
                continue;
            }
            if !segment.op.should_run(self.state.status) {
                tracing::debug!(op = ?segment.op, status = self.state.status, "skipping segment");
                continue;
            }

            self.state.chain = segment.op;
            self.execute_segment(segment.text)?;
        }
        Ok(())
    }

    fn execute_segment(&mut self, text: &str) -> Result<(), ShellError> {
        let expanded = substitution::expand_alias(text, &self.aliases, &self.delimiters);
        let mut words: Vec<String> = tokenize(&expanded, &self.delimiters)
            .into_iter()
            .map(str::to_owned)
            .collect();

        let scope = VarScope {
            status: self.state.status,
            pid: std::process::id(),
            program_name: &self.program_name,
            env: &self.env,
        };
        substitution::expand_vars(&mut words, &scope);
        tracing::debug!(
            line = %self.state.line,
            chain = ?self.state.chain,
            argv = ?words,
            "executing segment"
        );

        self.state.begin_command(Argv::new(words));
        let outcome = self.dispatch();
        self.state.end_command();

        self.state.status = outcome?;
        Ok(())
    }

    fn dispatch(&mut self) -> Result<i32, ShellError> {
        // everything expanded away
        let Some(word) = self.state.command_word().map(str::to_owned) else {
            return Ok(self.state.status);
        };

        match process::resolve(&word, &self.builtins, self.env.lookup("PATH")) {
            Ok(Dispatch::Builtin(handler)) => self.run_builtin(&word, handler),
            Ok(Dispatch::External(path)) => {
                self.state.set_path(path);
                Ok(self.run_external(&word))
            }
            Ok(Dispatch::NotFound) => Ok(self.not_found(&word)),
            Err(e) => {
                tracing::debug!(command = %word, "resolve failed: {}", e);
                Ok(self.not_found(&word))
            }
        }
    }

    fn run_builtin(&mut self, word: &str, handler: BuiltinFn) -> Result<i32, ShellError> {
        let argv = self.state.take_argv().unwrap_or_default();
        match handler(self, argv.args()) {
            Ok(status) => Ok(status),
            Err(CommandError::Exit(code)) => Err(ShellError::Exit(code)),
            Err(e) => {
                self.diagnose(word, &e);
                Ok(e.status())
            }
        }
    }

    fn run_external(&mut self, word: &str) -> i32 {
        let Some(path) = self.state.path().map(Path::to_path_buf) else {
            return self.not_found(word);
        };
        let argv = self.state.take_argv().unwrap_or_default();

        // builtin output written so far must land before the child's
        if let Err(e) = self.out.flush() {
            tracing::warn!(command = %word, "cannot flush output: {}", e);
        }

        let environ = self.exported_env();
        match process::spawn(&path, argv.as_slice(), environ).and_then(ChildGuard::wait) {
            Ok(status) => {
                let code = process::exit_code(status);
                tracing::debug!(command = %word, code, "child finished");
                code
            }
            Err(e) => {
                tracing::debug!(command = %word, "{}", e);
                self.diagnose(word, e.diagnostic());
                STATUS_NOT_FOUND
            }
        }
    }

    fn not_found(&mut self, word: &str) -> i32 {
        self.diagnose(word, "not found");
        STATUS_NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::shell::test_support::{test_shell, Capture};
    use crate::shell::Shell;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn script(dir: &tempfile::TempDir, name: &str, body: &str) -> std::io::Result<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, body)?;
        Ok(path)
    }

    fn run_lines(shell: &mut Shell, lines: &[&str]) -> Result<(), crate::error::ShellError> {
        for line in lines {
            shell.execute_line(line)?;
        }
        Ok(())
    }

    fn assert_quiet(err: &Capture) {
        assert_eq!(err.contents(), "");
    }

    #[test]
    fn test_and_short_circuits() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("getenv NOPE && setenv RAN yes")?;

        assert_eq!(shell.env().lookup("RAN"), None);
        assert_eq!(shell.status(), 1);
        Ok(())
    }

    #[test]
    fn test_or_runs_on_failure() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("getenv NOPE || setenv RAN yes")?;
        assert_eq!(shell.env().lookup("RAN"), Some("yes"));
        assert_eq!(shell.status(), 0);

        shell.execute_line("setenv OK 1 || setenv SKIPPED yes")?;
        assert_eq!(shell.env().lookup("SKIPPED"), None);
        Ok(())
    }

    #[test]
    fn test_sequence_continues_after_skip() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("getenv NOPE && setenv X 1 ; setenv Y 1")?;

        assert_eq!(shell.env().lookup("X"), None);
        assert_eq!(shell.env().lookup("Y"), Some("1"));
        Ok(())
    }

    #[test]
    fn test_status_variable_after_external() -> TestResult {
        let dir = tempfile::tempdir()?;
        let exit3 = script(&dir, "exit3.sh", "exit 3\n")?;
        let (mut shell, _, err) = test_shell();

        shell.execute_line(&format!("sh {} ; setenv LAST $?", exit3.display()))?;

        assert_eq!(shell.env().lookup("LAST"), Some("3"));
        assert_eq!(shell.status(), 0);
        assert_quiet(&err);
        Ok(())
    }

    #[test]
    fn test_direct_path_command() -> TestResult {
        let dir = tempfile::tempdir()?;
        let fail = script(&dir, "fail.sh", "exit 9\n")?;
        let (mut shell, _, _) = test_shell();

        shell.execute_line(&format!("/bin/sh {}", fail.display()))?;
        assert_eq!(shell.status(), 9);
        Ok(())
    }

    #[test]
    fn test_unknown_command() -> TestResult {
        let (mut shell, _, err) = test_shell();
        run_lines(&mut shell, &["setenv A 1", "zzzz-not-a-command arg"])?;

        assert_eq!(shell.status(), 127);
        assert_eq!(err.contents(), "capillary: 2: zzzz-not-a-command: not found\n");
        assert_eq!(shell.state().err_count, 1);
        Ok(())
    }

    #[test]
    fn test_missing_direct_path() -> TestResult {
        let (mut shell, _, err) = test_shell();
        shell.execute_line("/nonexistent/bin/tool")?;

        assert_eq!(shell.status(), 127);
        assert_eq!(err.contents(), "capillary: 1: /nonexistent/bin/tool: not found\n");
        Ok(())
    }

    #[test]
    fn test_non_executable_direct_path() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let plain = script(&dir, "plain", "exit 0\n")?;
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644))?;
        let (mut shell, _, err) = test_shell();

        shell.execute_line(&plain.display().to_string())?;
        assert_eq!(shell.status(), 127);
        assert_eq!(
            err.contents(),
            format!("capillary: 1: {}: Permission denied\n", plain.display())
        );

        shell.execute_line("setenv AFTER 1")?;
        assert_eq!(shell.env().lookup("AFTER"), Some("1"));
        assert_eq!(shell.status(), 0);
        Ok(())
    }

    #[test]
    fn test_state_records_line_and_chain() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("getenv NOPE || setenv A 1")?;

        assert_eq!(shell.state().line, "getenv NOPE || setenv A 1");
        assert_eq!(shell.state().chain, crate::shell::chain::ChainOp::Or);
        Ok(())
    }

    #[test]
    fn test_unset_path_is_not_found() -> TestResult {
        let (mut shell, _, err) = test_shell();
        run_lines(&mut shell, &["unsetenv PATH", "sh -c true"])?;

        assert_eq!(shell.status(), 127);
        assert!(err.contents().ends_with("sh: not found\n"));
        Ok(())
    }

    #[test]
    fn test_exit_propagates() {
        let (mut shell, _, _) = test_shell();
        let result = shell.execute_line("exit 5");
        assert!(matches!(result, Err(crate::error::ShellError::Exit(5))));
    }

    #[test]
    fn test_exit_bad_argument() -> TestResult {
        let (mut shell, _, err) = test_shell();
        shell.execute_line("exit abc")?;

        assert_eq!(shell.status(), 2);
        assert!(err.contents().contains("numeric argument required"));
        Ok(())
    }

    #[test]
    fn test_blank_and_empty_segments() -> TestResult {
        let (mut shell, _, err) = test_shell();
        shell.execute_line("getenv NOPE")?;
        assert_eq!(shell.status(), 1);
        let errors = err.contents();

        run_lines(&mut shell, &["", "   ", ";;", " ; ", "# just a comment"])?;

        assert_eq!(shell.status(), 1);
        assert_eq!(err.contents(), errors);
        assert_eq!(shell.state().line_count, 6);
        Ok(())
    }

    #[test]
    fn test_comment_is_stripped() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("setenv C 1 # ; setenv D 2")?;

        assert_eq!(shell.env().lookup("C"), Some("1"));
        assert_eq!(shell.env().lookup("D"), None);
        Ok(())
    }

    #[test]
    fn test_alias_expansion() -> TestResult {
        let (mut shell, _, _) = test_shell();
        run_lines(&mut shell, &["alias se=setenv", "se X 1 ; se Y 2"])?;

        assert_eq!(shell.env().lookup("X"), Some("1"));
        assert_eq!(shell.env().lookup("Y"), Some("2"));
        Ok(())
    }

    #[test]
    fn test_alias_is_single_pass() -> TestResult {
        let (mut shell, _, err) = test_shell();
        run_lines(&mut shell, &["alias zzfirst=zzsecond", "alias zzsecond=setenv", "zzfirst X 1"])?;

        assert_eq!(shell.env().lookup("X"), None);
        assert_eq!(shell.status(), 127);
        assert!(err.contents().ends_with("capillary: 3: zzsecond: not found\n"));
        Ok(())
    }

    #[test]
    fn test_special_variables() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("setenv PID $$ ; setenv ME $0")?;

        let pid = std::process::id().to_string();
        assert_eq!(shell.env().lookup("PID"), Some(pid.as_str()));
        assert_eq!(shell.env().lookup("ME"), Some("capillary"));
        Ok(())
    }

    #[test]
    fn test_child_sees_session_env() -> TestResult {
        let dir = tempfile::tempdir()?;
        let check = script(&dir, "check.sh", "[ \"$MARK\" = hello ]\n")?;
        let (mut shell, _, _) = test_shell();

        run_lines(&mut shell, &["setenv MARK hello", &format!("sh {}", check.display())])?;
        assert_eq!(shell.status(), 0);

        run_lines(&mut shell, &["unsetenv MARK", &format!("sh {}", check.display())])?;
        assert_eq!(shell.status(), 1);
        Ok(())
    }

    #[test]
    fn test_argv_released_after_segment() -> TestResult {
        let (mut shell, _, _) = test_shell();
        shell.execute_line("setenv A 1 ; zzzz-missing")?;

        assert!(shell.state().argv().is_none());
        assert!(shell.state().path().is_none());
        assert_eq!(shell.state().argc(), 0);
        Ok(())
    }

    #[test]
    fn test_builtin_output_order() -> TestResult {
        let (mut shell, out, _) = test_shell();
        run_lines(&mut shell, &["setenv B 2", "getenv B ; getenv PATH"])?;

        assert_eq!(out.contents(), "2\n/bin:/usr/bin\n");
        Ok(())
    }
}
