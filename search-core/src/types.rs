//! Wire DTOs shared by the search client and server.
//!
//! # Design
//! `SearchRequest` is the caller-facing input; the numeric fields are signed
//! so out-of-range values can be rejected before anything touches the
//! network. `ErrorCode` is the closed set of reasons the server can put in a
//! `400` envelope, serialized to the legacy wire strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest page a caller may ask for. Larger limits are clamped.
pub const MAX_LIMIT: i32 = 25;

/// Header carrying the shared secret on every search request.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Sort direction requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderBy {
    Ascending,
    /// Keep dataset order.
    #[default]
    AsIs,
    Descending,
}

impl OrderBy {
    /// Numeric code used in the `order_by` query parameter.
    pub fn code(self) -> i32 {
        match self {
            OrderBy::Ascending => -1,
            OrderBy::AsIs => 0,
            OrderBy::Descending => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(OrderBy::Ascending),
            0 => Some(OrderBy::AsIs),
            1 => Some(OrderBy::Descending),
            _ => None,
        }
    }
}

/// Parameters of a single `find_users` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub limit: i32,
    pub offset: i32,
    /// Free text, interpreted server-side by an `about=` or `name=` prefix.
    pub query: String,
    /// One of `""`, `"Id"`, `"Name"`, `"Age"`. Checked by the server.
    pub order_field: String,
    pub order_by: OrderBy,
}

/// A user as returned by the search service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub users: Vec<User>,
    /// `true` when the server had at least one record past this page.
    pub next_page: bool,
}

/// JSON body the server sends with a `400`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchErrorResponse {
    pub error: String,
}

impl SearchErrorResponse {
    pub fn new(code: &ErrorCode) -> Self {
        Self {
            error: code.as_str().to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_wire(&self.error)
    }
}

/// Server-side failure reasons that cross the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    BadOrderField,
    Range,
    Param,
    Fatal,
    /// Any reason string this client does not recognize, kept verbatim.
    Unknown(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::BadOrderField => "ErrorBadOrderField",
            ErrorCode::Range => "ErrorOffsetOutOfRange",
            ErrorCode::Param => "ErrorBadParam",
            ErrorCode::Fatal => "ErrorFatal",
            ErrorCode::Unknown(text) => text,
        }
    }

    pub fn from_wire(text: &str) -> Self {
        match text {
            "ErrorBadOrderField" => ErrorCode::BadOrderField,
            "ErrorOffsetOutOfRange" => ErrorCode::Range,
            "ErrorBadParam" => ErrorCode::Param,
            "ErrorFatal" => ErrorCode::Fatal,
            other => ErrorCode::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
