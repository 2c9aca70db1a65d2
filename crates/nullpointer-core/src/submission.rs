use crate::error::SubmissionError;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Something to send to a null pointer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Upload a local file.
    Upload(PathBuf),
    /// Shorten a URL.
    Shorten(String),
    /// Have the service fetch and host a remote URL.
    Remote(String),
}

impl Submission {
    /// The multipart form field the service expects for this submission.
    pub fn field(&self) -> &'static str {
        match self {
            Submission::Upload(_) => "file",
            Submission::Shorten(_) => "shorten",
            Submission::Remote(_) => "url",
        }
    }

    /// The value recorded in the history for this submission.
    ///
    /// Upload paths must be valid UTF-8. A lossy conversion would map
    /// distinct paths onto the same item.
    pub fn item(&self) -> Result<&str, SubmissionError> {
        match self {
            Submission::Upload(path) => path
                .to_str()
                .ok_or_else(|| SubmissionError::NonUtf8Path(path.clone())),
            Submission::Shorten(url) | Submission::Remote(url) => Ok(url),
        }
    }

    /// The local file to read, for uploads.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Submission::Upload(path) => Some(path),
            Submission::Shorten(_) | Submission::Remote(_) => None,
        }
    }
}

impl Display for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Submission::Upload(path) => write!(f, "upload {}", path.display()),
            Submission::Shorten(url) => write!(f, "shorten {url}"),
            Submission::Remote(url) => write!(f, "remote {url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields() {
        assert_eq!(Submission::Upload("a.png".into()).field(), "file");
        assert_eq!(Submission::Shorten("https://example.com".into()).field(), "shorten");
        assert_eq!(Submission::Remote("https://example.com/a.png".into()).field(), "url");
    }

    #[test]
    fn history_items() {
        assert_eq!(
            Submission::Upload("/tmp/a.png".into()).item(),
            Ok("/tmp/a.png")
        );
        assert_eq!(
            Submission::Shorten("https://example.com".into()).item(),
            Ok("https://example.com")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_upload_paths_have_no_item() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let a = PathBuf::from(OsStr::from_bytes(b"/tmp/\xff.png"));
        let b = PathBuf::from(OsStr::from_bytes(b"/tmp/\xfe.png"));

        assert_eq!(
            Submission::Upload(a.clone()).item(),
            Err(SubmissionError::NonUtf8Path(a))
        );
        assert_eq!(
            Submission::Upload(b.clone()).item(),
            Err(SubmissionError::NonUtf8Path(b))
        );
    }

    #[test]
    fn only_uploads_have_paths() {
        assert_eq!(
            Submission::Upload("a.png".into()).path(),
            Some(Path::new("a.png"))
        );
        assert!(Submission::Remote("https://example.com".into()).path().is_none());
    }
}
