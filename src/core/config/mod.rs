mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use thiserror::Error;

use crate::core::env::EnvError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {source}")]
    Env {
        path: String,
        line: usize,
        #[source]
        source: EnvError,
    },
}
