use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use super::ProcessError;
use crate::core::commands::{BuiltinFn, BuiltinTable};

/// How a command word is going to be run.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Builtin(BuiltinFn),
    External(PathBuf),
    NotFound,
}

/// Classifies `word`. A word containing `/` is used as given; anything else
/// that is not a builtin is looked up along `search_path`. An unset or empty
/// search path is an error, there is no current-directory fallback.
pub fn resolve(
    word: &str,
    builtins: &BuiltinTable,
    search_path: Option<&str>,
) -> Result<Dispatch, ProcessError> {
    if let Some(handler) = builtins.get(word) {
        return Ok(Dispatch::Builtin(handler));
    }

    if word.contains('/') {
        return Ok(Dispatch::External(PathBuf::from(word)));
    }

    let search_path = search_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ProcessError::CommandNotFound(word.to_string()))?;

    Ok(find_in_path(search_path, word)
        .map(Dispatch::External)
        .unwrap_or(Dispatch::NotFound))
}

fn find_in_path(search_path: &str, word: &str) -> Option<PathBuf> {
    search_path
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(word))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
