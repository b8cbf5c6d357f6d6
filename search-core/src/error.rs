//! Errors returned by `SearchClient`.
//!
//! # Design
//! Each variant corresponds to one terminal branch of a search call, so a
//! caller can match on the failure class without parsing messages. The
//! `Display` text is stable and is what callers log or show.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Rejected before any network call, or an order field the server refused.
    #[error("{0}")]
    Validation(String),

    /// The server returned 401.
    #[error("Bad AccessToken")]
    Auth,

    /// The round trip did not finish within the client deadline.
    #[error("timeout for {url}")]
    Timeout { url: String },

    /// Connection refused, DNS failure, or any other transport failure.
    #[error("unknown error {0}")]
    UnknownNetwork(String),

    /// The body could not be decoded, or carried an unexpected reason.
    #[error("{0}")]
    Protocol(String),

    /// The server returned 500.
    #[error("SearchServer fatal error: {0}")]
    FatalServer(String),

    /// Any status other than 200, 400, 401 or 500.
    #[error("unexpected status code {0}")]
    UnknownStatus(u16),
}
