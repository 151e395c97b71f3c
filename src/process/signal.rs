use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use signal_hook::consts::{SIGHUP, SIGTERM};

use crate::process::ProcessError;

/// Keeps SIGINT from killing the interpreter while a foreground child runs.
/// The child still receives the signal from the terminal.
pub fn install_interrupt_handler() -> Result<(), ProcessError> {
    ctrlc::set_handler(|| {})?;
    Ok(())
}

/// Records SIGTERM or SIGHUP so the session loop can end between lines.
#[derive(Clone, Debug, Default)]
pub struct Termination {
    signal: Arc<AtomicUsize>,
}

impl Termination {
    pub fn install() -> Result<Self, ProcessError> {
        let termination = Self::default();
        for signal in [SIGTERM, SIGHUP] {
            signal_hook::flag::register_usize(
                signal,
                Arc::clone(&termination.signal),
                signal as usize,
            )
            .map_err(|e| ProcessError::Signal(e.to_string()))?;
        }
        Ok(termination)
    }

    /// The signal that arrived, if any.
    pub fn pending(&self) -> Option<i32> {
        match self.signal.load(Ordering::SeqCst) {
            0 => None,
            signal => i32::try_from(signal).ok(),
        }
    }

    #[cfg(test)]
    pub(crate) fn raise(&self, signal: i32) {
        self.signal.store(signal as usize, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_defaults_to_none() {
        let termination = Termination::default();
        assert_eq!(termination.pending(), None);
        termination.raise(SIGTERM);
        assert_eq!(termination.pending(), Some(SIGTERM));
    }
}
