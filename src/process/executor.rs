use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use super::ProcessError;

/// A running child. Dropping the guard without calling [`ChildGuard::wait`]
/// still reaps the process.
#[derive(Debug)]
pub struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn wait(mut self) -> Result<ExitStatus, ProcessError> {
        match self.child.take() {
            Some(mut child) => child.wait().map_err(ProcessError::Wait),
            None => Err(ProcessError::Wait(std::io::Error::other(
                "child already reaped",
            ))),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.wait() {
                tracing::warn!(pid = child.id(), "failed to reap child: {}", e);
            }
        }
    }
}

/// Starts `path` with `argv` (argv[0] is passed through as typed) and exactly
/// the `NAME=VALUE` entries of `environ`.
pub fn spawn(path: &Path, argv: &[String], environ: &[String]) -> Result<ChildGuard, ProcessError> {
    let mut command = Command::new(path);
    if let Some((arg0, args)) = argv.split_first() {
        command.arg0(arg0).args(args);
    }
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .env_clear()
        .envs(environ.iter().filter_map(|entry| entry.split_once('=')));

    let child = command.spawn().map_err(|source| ProcessError::Spawn {
        command: path.display().to_string(),
        source,
    })?;
    tracing::debug!(pid = child.id(), path = %path.display(), "spawned child");

    Ok(ChildGuard { child: Some(child) })
}

/// Shell-style status: the exit code, or 128 plus the terminating signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}
