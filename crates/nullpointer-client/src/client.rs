use crate::error::{ClientError, Result};
use async_trait::async_trait;
use nullpointer_core::{ServiceUrl, Submission};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

pub const DEFAULT_USER_AGENT: &str = concat!("nullpynter/", env!("CARGO_PKG_VERSION"));

/// Sends submissions to a null pointer service.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    /// Submits `submission` to `service` and returns what the service
    /// answered with, usually the URL of the hosted file or short link.
    async fn submit(&self, service: &ServiceUrl, submission: &Submission) -> Result<String>;
}

/// Settings for the underlying HTTP client.
///
/// ```rust
/// use std::time::Duration;
/// use nullpointer_client::ClientSettings;
///
/// let settings = ClientSettings::builder()
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert!(settings.user_agent.starts_with("nullpynter/"));
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientSettings {
    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    /// Whole-request timeout. No timeout when unset.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// [`Submitter`] backed by an HTTP connection pool.
///
/// The pool is owned by the client; clone the client to share it.
#[derive(Debug, Clone)]
pub struct NullPointerClient {
    http: reqwest::Client,
}

impl NullPointerClient {
    /// Builds a client with its own connection pool.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http(builder.build()?))
    }

    /// Wraps an existing HTTP client.
    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the landing text of a service, which usually describes how to
    /// use it and its retention policy.
    pub async fn fetch_info(&self, service: &ServiceUrl) -> Result<String> {
        trace!(service = %service, "fetching service info");

        let response = self.http.get(service.as_str()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Rejected {
                status,
                body: body.trim().to_owned(),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl Submitter for NullPointerClient {
    async fn submit(&self, service: &ServiceUrl, submission: &Submission) -> Result<String> {
        debug!(service = %service, submission = %submission, "sending submission");

        let form = build_form(submission).await?;
        let response = self
            .http
            .post(service.as_str())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let answer = interpret_response(status, &body)?;

        debug!(service = %service, response = %answer, "service accepted submission");
        Ok(answer)
    }
}

/// Builds the multipart form for a submission. Uploads are read into memory.
pub(crate) async fn build_form(submission: &Submission) -> Result<Form> {
    let field = submission.field();

    match submission {
        Submission::Upload(path) => {
            // refuse before reading what could never be recorded
            submission.item()?;
            let data = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::ReadItem {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_owned());

            trace!(path = %path.display(), bytes = data.len(), "read upload");
            Ok(Form::new().part(field, Part::bytes(data).file_name(file_name)))
        }
        Submission::Shorten(url) | Submission::Remote(url) => {
            Ok(Form::new().text(field, url.clone()))
        }
    }
}

/// Turns a service reply into the response URL.
///
/// Services answer with plain text: the URL on success, an error message
/// otherwise.
pub(crate) fn interpret_response(status: StatusCode, body: &str) -> Result<String> {
    let body = body.trim();

    if !status.is_success() {
        return Err(ClientError::Rejected {
            status,
            body: body.to_owned(),
        });
    }
    if body.is_empty() {
        return Err(ClientError::EmptyResponse);
    }
    Ok(body.to_owned())
}
