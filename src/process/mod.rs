use thiserror::Error;

pub mod executor;
pub mod resolver;
pub mod signal;

pub use executor::{exit_code, spawn, ChildGuard};
pub use resolver::{resolve, Dispatch};

/// Status for a command that could not be found or started.
pub const STATUS_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("not found")]
    CommandNotFound(String),
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for child: {0}")]
    Wait(#[source] std::io::Error),
    #[error("signal error: {0}")]
    Signal(String),
}

impl ProcessError {
    /// Message shown after `PROGRAM: LINE: COMMAND:` in a diagnostic.
    pub fn diagnostic(&self) -> String {
        match self {
            ProcessError::Spawn { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => "not found".to_string(),
                std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
                _ => source.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl From<ctrlc::Error> for ProcessError {
    fn from(err: ctrlc::Error) -> Self {
        ProcessError::Signal(err.to_string())
    }
}
