use thiserror::Error;

use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("process error: {0}")]
    Process(#[from] ProcessError),
    #[error("{path}: {source}")]
    Script {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Session termination requested by `exit`; carries the final status.
    #[error("exit with code {0}")]
    Exit(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_display() {
        let errors = vec![
            ShellError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "io error")),
            ShellError::Process(ProcessError::CommandNotFound("zz".into())),
            ShellError::Exit(3),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
        assert_eq!(ShellError::Exit(3).to_string(), "exit with code 3");
    }
}
