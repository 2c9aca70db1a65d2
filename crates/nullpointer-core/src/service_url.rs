use crate::error::ServiceUrlError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The public 0x0.st instance.
pub const DEFAULT_SERVICE_URL: &str = "http://0x0.st";

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// A validated address of a null pointer service.
///
/// The URL is kept exactly as given (apart from surrounding whitespace) since
/// it is also the key of the service's history partition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceUrl(String);

impl ServiceUrl {
    /// Creates a new `ServiceUrl` after validating the input.
    ///
    /// Valid URLs use the `http` or `https` scheme and name a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ServiceUrlError> {
        let url = url.into();
        let url = url.trim();
        Self::validate(url)?;
        Ok(Self(url.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(url: &str) -> Result<(), ServiceUrlError> {
        if url.is_empty() {
            return Err(ServiceUrlError::Empty);
        }

        let Some(rest) = SCHEMES
            .iter()
            .find_map(|scheme| strip_prefix_ignore_case(url, scheme))
        else {
            return Err(ServiceUrlError::UnsupportedScheme(url.to_owned()));
        };

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ServiceUrlError::MissingHost(url.to_owned()));
        }

        Ok(())
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

impl Default for ServiceUrl {
    fn default() -> Self {
        Self(DEFAULT_SERVICE_URL.to_owned())
    }
}

impl Display for ServiceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ServiceUrl {
    type Err = ServiceUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ServiceUrl {
    type Error = ServiceUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceUrl> for String {
    fn from(value: ServiceUrl) -> Self {
        value.0
    }
}
