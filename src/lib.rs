pub mod core;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod input;
pub mod process;
pub mod shell;
