//! Client side of a null pointer service.
//!
//! [`NullPointerClient`] talks HTTP to the service, while
//! [`NullPointerService`] pairs any [`Submitter`] with a history repository
//! so that an item already sent to a service is not sent again.

pub mod client;
pub mod error;
pub mod service;

pub use client::{ClientSettings, NullPointerClient, Submitter};
pub use error::{ClientError, ServiceError};
pub use service::{NullPointerService, Outcome, ReusePolicy};
