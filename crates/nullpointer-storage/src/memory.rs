use nullpointer_core::error::Result;
use nullpointer_core::{History, HistoryRecord, HistoryRepository, Lookup};

/// A history that lives only as long as the process.
///
/// Useful for `--no-history` style runs and as a stand-in for
/// [`JsonFileHistory`](crate::JsonFileHistory) in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    history: History,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with an existing history.
    pub fn with_history(history: History) -> Self {
        Self { history }
    }
}

impl HistoryRepository for InMemoryHistory {
    fn get(&mut self) -> Result<History> {
        Ok(self.history.clone())
    }

    fn append(&mut self, item: &str, service_url: &str, response: &str) -> Result<()> {
        self.history.append(item, service_url, response);
        Ok(())
    }

    fn find(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>> {
        Ok(self.history.find(service_url, lookup))
    }

    fn pop(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>> {
        Ok(self.history.pop(service_url, lookup))
    }

    fn clear(&mut self, service_url: Option<&str>) -> Result<()> {
        self.history.clear(service_url);
        Ok(())
    }
}
