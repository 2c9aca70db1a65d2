pub mod json_file;
pub mod location;
pub mod memory;

pub use json_file::JsonFileHistory;
pub use location::{default_history_path, HistoryLocation};
pub use memory::InMemoryHistory;
pub use nullpointer_core::error::{HistoryError, Result};
pub use nullpointer_core::{History, HistoryRecord, HistoryRepository, Lookup};
