//! Core types and traits for the nullpointer client.
//!
//! This crate provides the history model shared by the storage backends
//! and the submission service, plus the validated service URL and the
//! submission variants understood by a null pointer service.

pub mod error;
pub mod history;
pub mod repository;
pub mod service_url;
pub mod submission;

pub use error::{HistoryError, ServiceUrlError, SubmissionError};
pub use history::{History, HistoryRecord, Lookup, Partition};
pub use repository::HistoryRepository;
pub use service_url::ServiceUrl;
pub use submission::Submission;
