use nullpointer_core::error::{HistoryError, Result};
use std::path::{Path, PathBuf};

/// Data directory, relative to the home directory.
const DATA_PATH: [&str; 2] = [".local", "share"];
const APP_DIR: &str = "nullpynter";
const HISTORY_FILE: &str = "history";

/// Where the history file lives: `<home>/.local/share/nullpynter/history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLocation {
    app_dir: PathBuf,
}

impl HistoryLocation {
    /// Resolves the location under an explicit home directory.
    pub fn under(home: impl AsRef<Path>) -> Self {
        let mut app_dir = home.as_ref().to_path_buf();
        app_dir.extend(DATA_PATH);
        app_dir.push(APP_DIR);
        Self { app_dir }
    }

    /// Resolves the location under the current user's home directory.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(HistoryError::NoHomeDirectory)?;
        Ok(Self::under(home))
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn file(&self) -> PathBuf {
        self.app_dir.join(HISTORY_FILE)
    }
}

/// The history file for the current user.
pub fn default_history_path() -> Result<PathBuf> {
    HistoryLocation::from_home().map(|location| location.file())
}
