//! Request encoding and response interpretation for the search service.
//!
//! # Design
//! `SearchClient` holds only the base URL and the access token and carries
//! no mutable state between calls. A call is split into `build_find_users`,
//! which validates the request and produces a `PreparedSearch`, and
//! `parse_find_users`, which turns the `HttpResponse` into a page or a typed
//! error. `find_users` glues the two around a `Transport`.
//!
//! # Pagination
//! The server has no "has more" signal. The client asks for one record past
//! the (clamped) limit; if that probe record comes back, the page is marked
//! `next_page` and the probe is dropped.

use tracing::debug;

use crate::error::SearchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};
use crate::types::{
    ErrorCode, SearchErrorResponse, SearchRequest, SearchResponse, User, ACCESS_TOKEN_HEADER,
    MAX_LIMIT,
};

/// Stateless client for the user search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
    access_token: String,
}

/// A validated, encoded request plus what is needed to interpret its reply.
#[derive(Debug, Clone)]
pub struct PreparedSearch {
    pub request: HttpRequest,
    /// Page size after clamping, without the probe record.
    pub limit: usize,
    /// The caller's order field, echoed in `ErrorBadOrderField` failures.
    pub order_field: String,
}

impl SearchClient {
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate `req` and encode it. Fails without touching the network.
    pub fn build_find_users(&self, req: &SearchRequest) -> Result<PreparedSearch, SearchError> {
        if req.limit < 0 {
            return Err(SearchError::Validation("limit must be > 0".to_string()));
        }
        if req.offset < 0 {
            return Err(SearchError::Validation("offset must be > 0".to_string()));
        }

        let limit = req.limit.min(MAX_LIMIT);

        let mut query = vec![
            ("limit".to_string(), (limit + 1).to_string()),
            ("offset".to_string(), req.offset.to_string()),
        ];
        if !req.query.is_empty() {
            query.push(("query".to_string(), req.query.clone()));
        }
        if !req.order_field.is_empty() {
            query.push(("order_field".to_string(), req.order_field.clone()));
        }
        query.push(("order_by".to_string(), req.order_by.code().to_string()));

        Ok(PreparedSearch {
            request: HttpRequest {
                url: self.base_url.clone(),
                query,
                headers: vec![(ACCESS_TOKEN_HEADER.to_string(), self.access_token.clone())],
            },
            limit: limit as usize,
            order_field: req.order_field.clone(),
        })
    }

    /// Map a completed exchange to a page or a typed error.
    pub fn parse_find_users(
        &self,
        prepared: &PreparedSearch,
        response: HttpResponse,
    ) -> Result<SearchResponse, SearchError> {
        match response.status {
            200 => {}
            401 => return Err(SearchError::Auth),
            400 => return Err(bad_request(prepared, &response.body)),
            500 => return Err(SearchError::FatalServer(response.body)),
            other => return Err(SearchError::UnknownStatus(other)),
        }

        let mut users: Vec<User> = serde_json::from_str(&response.body)
            .map_err(|e| SearchError::Protocol(format!("cant unpack result json: {e}")))?;

        let next_page = users.len() == prepared.limit + 1;
        if next_page {
            users.pop();
        }

        Ok(SearchResponse { users, next_page })
    }

    /// Run one search over `transport`. At most one round trip, no retries.
    pub fn find_users<T: Transport + ?Sized>(
        &self,
        transport: &T,
        req: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        let prepared = self.build_find_users(req)?;
        debug!(
            url = %prepared.request.url,
            limit = prepared.limit + 1,
            offset = req.offset,
            "sending search request"
        );

        let response = transport
            .send(&prepared.request)
            .map_err(|e| match e {
                TransportError::Timeout => SearchError::Timeout {
                    url: prepared.request.url.clone(),
                },
                TransportError::Network(msg) => SearchError::UnknownNetwork(msg),
            })?;

        self.parse_find_users(&prepared, response)
    }
}

fn bad_request(prepared: &PreparedSearch, body: &str) -> SearchError {
    let envelope: SearchErrorResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => return SearchError::Protocol(format!("cant unpack error json: {e}")),
    };

    match envelope.code() {
        ErrorCode::BadOrderField => {
            SearchError::Validation(format!("OrderFeld {} invalid", prepared.order_field))
        }
        other => SearchError::Protocol(format!("unknown bad request error: {other}")),
    }
}
