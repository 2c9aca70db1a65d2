use nullpointer_core::error::{HistoryError, Result};
use nullpointer_core::{History, HistoryRecord, HistoryRepository, Lookup};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

use crate::location::HistoryLocation;

/// History persisted as a pretty-printed JSON file.
///
/// Every operation reloads the file before acting and every mutation is
/// written back immediately, so the in-memory copy never outlives a single
/// call. Unreadable content is treated as an empty history rather than an
/// error. Saves go through a sibling temporary file that is renamed into
/// place, so a crash mid-write leaves the previous file intact.
///
/// There is no locking: concurrent writers lose updates (last save wins).
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    history: History,
}

impl JsonFileHistory {
    /// Opens the history at `path`, creating its directory and an empty file
    /// if they are missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| HistoryError::io("create directory for", &path, e))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| HistoryError::io("create", &path, e))?;

        let mut store = Self {
            path,
            history: History::new(),
        };
        store.load()?;

        debug!(path = %store.path.display(), records = store.history.len(), "opened history");
        Ok(store)
    }

    /// Opens the history at the current user's default location.
    pub fn open_default() -> Result<Self> {
        Self::open(HistoryLocation::from_home()?.file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> Result<()> {
        let raw = fs::read(&self.path).map_err(|e| HistoryError::io("read", &self.path, e))?;

        self.history = if raw.iter().all(u8::is_ascii_whitespace) {
            trace!(path = %self.path.display(), "history file is empty");
            History::new()
        } else {
            match serde_json::from_slice(&raw) {
                Ok(history) => history,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "history file is malformed, starting from an empty history"
                    );
                    History::new()
                }
            }
        };

        Ok(())
    }

    fn save(&self) -> Result<()> {
        let payload = serde_json::to_vec_pretty(&self.history)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        // a uniquely named sibling, removed on drop unless persisted
        let dir = self.dir();
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| HistoryError::io("create temporary", dir, e))?;
        tmp.write_all(&payload)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| HistoryError::io("write temporary", tmp.path(), e))?;

        tmp.persist(&self.path)
            .map_err(|e| HistoryError::io("replace", &self.path, e.error))?;

        trace!(path = %self.path.display(), records = self.history.len(), "saved history");
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl HistoryRepository for JsonFileHistory {
    fn get(&mut self) -> Result<History> {
        self.load()?;
        Ok(self.history.clone())
    }

    fn append(&mut self, item: &str, service_url: &str, response: &str) -> Result<()> {
        self.load()?;
        self.history.append(item, service_url, response);
        self.save()?;

        debug!(service_url, response, item, "recorded submission");
        Ok(())
    }

    fn find(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>> {
        self.load()?;
        Ok(self.history.find(service_url, lookup))
    }

    fn pop(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>> {
        self.load()?;
        let popped = self.history.pop(service_url, lookup);
        self.save()?;

        match &popped {
            Some(record) => debug!(
                service_url = %record.service_url,
                response = %record.response,
                item = %record.item,
                "removed record"
            ),
            None => trace!(service_url, ?lookup, "no record to remove"),
        }
        Ok(popped)
    }

    fn clear(&mut self, service_url: Option<&str>) -> Result<()> {
        self.load()?;
        self.history.clear(service_url);
        self.save()?;

        debug!(service_url = service_url.unwrap_or("*"), "cleared history");
        Ok(())
    }
}
