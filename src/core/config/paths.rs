use super::ConfigError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
    /// Set when the rc file was named explicitly, so a missing file is an error.
    pub(super) explicit_rc: bool,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::under(&home))
    }

    pub fn under(home: &Path) -> Self {
        ConfigPaths {
            rc_path: home.join(".capillaryrc"),
            history_path: home.join(".capillary_history"),
            explicit_rc: false,
        }
    }

    pub fn with_rc(mut self, rc_path: PathBuf) -> Self {
        self.rc_path = rc_path;
        self.explicit_rc = true;
        self
    }
}
