use nullpointer_core::{HistoryError, SubmissionError};
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for requests against a null pointer service.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("failed to read {}: {source}", path.display())]
    ReadItem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("service returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
