//! Client core for the user search service.
//!
//! # Overview
//! Validates and encodes `SearchRequest` values into `HttpRequest` data,
//! and interprets `HttpResponse` data into a `SearchResponse` page or a
//! typed `SearchError`. The network round trip goes through the
//! `Transport` trait; `UreqTransport` is the stock blocking implementation.
//!
//! # Design
//! - `SearchClient` is stateless: base URL and access token only.
//! - Pagination uses an explicit over-fetch: one record beyond the page is
//!   requested and its presence sets `next_page`.
//! - The wire types in `types` are shared with the server crate so both
//!   sides agree on the error envelope and order codes.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{PreparedSearch, SearchClient};
pub use error::SearchError;
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{ErrorCode, OrderBy, SearchErrorResponse, SearchRequest, SearchResponse, User};
