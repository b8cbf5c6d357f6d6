//! Executes an `HttpRequest` and hands back an `HttpResponse`.
//!
//! # Design
//! `Transport` is the only I/O seam of the client. It reports just two
//! failure classes, because that is all the response interpreter
//! distinguishes: the deadline expired, or the exchange failed for any other
//! reason. Status codes are data, never transport errors.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// Round-trip deadline used by `UreqTransport::default()`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("deadline exceeded")]
    Timeout,

    #[error("{0}")]
    Network(String),
}

/// Sends one request and waits for the complete response.
///
/// Implementations must release the connection on every outcome and must
/// not retry.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport on top of a `ureq` agent.
///
/// The timeout covers connect, send and the full body read.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.query {
            builder = builder.query(key.as_str(), value.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(classify)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::TimedOut => TransportError::Timeout,
        other => TransportError::Network(other.to_string()),
    }
}
