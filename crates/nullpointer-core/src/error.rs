use std::path::PathBuf;
use thiserror::Error;

/// Result type for history repository operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to {action} history file {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history serialization failed: {0}")]
    Serialization(String),
    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

impl HistoryError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceUrlError {
    #[error("service url must not be empty")]
    Empty,
    #[error("service url must start with http:// or https://: '{0}'")]
    UnsupportedScheme(String),
    #[error("service url has no host: '{0}'")]
    MissingHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("upload path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}
