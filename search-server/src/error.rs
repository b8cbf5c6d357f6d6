//! Request failures and their HTTP representation.
//!
//! `400` carries the JSON envelope; `401` and `500` are plain text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use search_core::SearchErrorResponse;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bad Access Token")]
    Unauthorized,

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::Pipeline(PipelineError::Range { .. })
            | ServerError::Dataset(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Pipeline(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServerError::Pipeline(err) if status == StatusCode::BAD_REQUEST => {
                (status, Json(SearchErrorResponse::new(&err.code()))).into_response()
            }
            _ => (status, self.to_string()).into_response(),
        }
    }
}
