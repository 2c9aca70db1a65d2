use crate::client::Submitter;
use crate::error::ServiceError;
use nullpointer_core::{History, HistoryRecord, HistoryRepository, Lookup, ServiceUrl, Submission};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Whether a previous submission of the same item may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReusePolicy {
    /// Return the recorded response if the item was already sent to the service.
    #[default]
    ReuseExisting,
    /// Always contact the service. The new response is still recorded.
    AlwaysSubmit,
}

/// What [`NullPointerService::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service was contacted and the result recorded.
    Submitted(HistoryRecord),
    /// The item was found in the history; the service was not contacted.
    Reused(HistoryRecord),
}

impl Outcome {
    pub fn record(&self) -> &HistoryRecord {
        match self {
            Outcome::Submitted(record) | Outcome::Reused(record) => record,
        }
    }

    pub fn response(&self) -> &str {
        &self.record().response
    }

    pub fn is_reused(&self) -> bool {
        matches!(self, Outcome::Reused(_))
    }
}

/// Submits items to null pointer services and keeps the history in step.
///
/// A successful submission is appended to the history; a failed one leaves
/// the history untouched.
#[derive(Debug)]
pub struct NullPointerService<S, H> {
    submitter: S,
    history: H,
}

impl<S: Submitter, H: HistoryRepository> NullPointerService<S, H> {
    pub fn new(submitter: S, history: H) -> Self {
        Self { submitter, history }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Submits `submission` to `service`, or returns the recorded response
    /// when `policy` allows reuse and the item was already submitted there.
    pub async fn submit(
        &mut self,
        service: &ServiceUrl,
        submission: &Submission,
        policy: ReusePolicy,
    ) -> Result<Outcome> {
        let item = submission.item()?;

        if policy == ReusePolicy::ReuseExisting {
            if let Some(record) = self.history.find(service.as_str(), Lookup::Item(item))? {
                info!(
                    service = %service,
                    item = %item,
                    response = %record.response,
                    "already submitted, reusing recorded response"
                );
                return Ok(Outcome::Reused(record));
            }
        }

        let response = self.submitter.submit(service, submission).await?;
        self.history.append(item, service.as_str(), &response)?;

        debug!(service = %service, item = %item, response = %response, "submission recorded");
        Ok(Outcome::Submitted(HistoryRecord::new(
            service.as_str(),
            response,
            item,
        )))
    }

    /// Returns the full history across all services.
    pub fn history(&mut self) -> Result<History> {
        self.history.get().map_err(ServiceError::from)
    }

    /// Removes a record from the history. This does not delete anything on
    /// the service itself.
    pub fn forget(
        &mut self,
        service: &ServiceUrl,
        lookup: Lookup<'_>,
    ) -> Result<Option<HistoryRecord>> {
        self.history
            .pop(service.as_str(), lookup)
            .map_err(ServiceError::from)
    }

    /// Clears the records of one service, or of every service when `None`.
    pub fn clear(&mut self, service: Option<&ServiceUrl>) -> Result<()> {
        self.history
            .clear(service.map(ServiceUrl::as_str))
            .map_err(ServiceError::from)
    }
}
