mod vars;

pub use vars::EnvStore;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("empty variable name")]
    EmptyName,
    #[error("invalid variable name: {0}")]
    InvalidName(String),
}
