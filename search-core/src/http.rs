//! HTTP exchange described as plain data.
//!
//! # Design
//! The client builds an `HttpRequest` and interprets an `HttpResponse`
//! without owning the I/O in between. Any `Transport` can carry the
//! exchange; the core stays deterministic and testable against simulated
//! responses.
//!
//! Every search call is a `GET`, so no method is carried.

/// An outgoing search request.
///
/// Query pairs are kept unencoded; the transport is responsible for
/// percent-encoding them onto `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first query pair named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response received by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
