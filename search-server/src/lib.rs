//! HTTP search service over a user dataset.
//!
//! # Overview
//! `GET /` checks the `AccessToken` header, loads the records from the
//! configured `RecordProvider`, runs the query pipeline and answers with a
//! JSON array of users. Every `400` carries the `{"error": ...}` envelope.
//!
//! # Design
//! - The access token is injected through `AppState`; nothing is read from
//!   process-wide state.
//! - Each request gets its own copy of the records, so handlers share no
//!   mutable state and need no locking.

pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use search_core::{types::ACCESS_TOKEN_HEADER, User};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::dataset::RecordProvider;
use crate::error::ServerError;
use crate::pipeline::{PipelineError, SearchParams};

pub use config::Config;

#[derive(Clone)]
pub struct AppState {
    access_token: Arc<str>,
    provider: Arc<dyn RecordProvider>,
}

impl AppState {
    pub fn new(access_token: impl Into<String>, provider: impl RecordProvider + 'static) -> Self {
        Self {
            access_token: Arc::from(access_token.into()),
            provider: Arc::new(provider),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ServerError> {
    authorize(&state, &headers)?;

    let Query(pairs) = query.map_err(|rejection| PipelineError::Param {
        name: "query string",
        value: rejection.body_text(),
    })?;
    let params = SearchParams::from_pairs(pairs);

    let provider = Arc::clone(&state.provider);
    let records = tokio::task::spawn_blocking(move || provider.records())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .inspect_err(|e| error!(error = %e, "failed to load dataset"))?;

    let records = pipeline::apply(records, &params)
        .inspect_err(|e| debug!(error = %e, "search rejected"))?;

    let users: Vec<User> = records.into_iter().map(User::from).collect();
    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(users),
    )
        .into_response())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ServerError> {
    let token = headers
        .get(ACCESS_TOKEN_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();
    if token.is_empty() || token != state.access_token.as_bytes() {
        warn!("rejected search with bad access token");
        return Err(ServerError::Unauthorized);
    }
    Ok(())
}
