use crate::error::Result;
use crate::history::{History, HistoryRecord, Lookup};

/// A store of completed submissions.
///
/// Every operation takes `&mut self`: implementations may refresh their view
/// of the backing state on each call, and no internal locking is provided.
/// Callers sharing a repository across threads must serialize access.
pub trait HistoryRepository: Send + 'static {
    /// Returns the full current history.
    fn get(&mut self) -> Result<History>;

    /// Records that `item` was submitted to `service_url` and answered with
    /// `response`. An existing record at `response` is replaced.
    fn append(&mut self, item: &str, service_url: &str, response: &str) -> Result<()>;

    /// Looks up a record in the `service_url` partition without removing it.
    /// Returns `None` if nothing matches.
    fn find(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>>;

    /// Removes a record and returns it, or `None` if nothing matches.
    ///
    /// See [`History::pop`] for how each lookup mode is resolved.
    fn pop(&mut self, service_url: &str, lookup: Lookup<'_>) -> Result<Option<HistoryRecord>>;

    /// Clears the `service_url` partition, or the whole history when `None`.
    fn clear(&mut self, service_url: Option<&str>) -> Result<()>;
}
