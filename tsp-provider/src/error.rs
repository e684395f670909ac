//! Error types for tsp-provider
//!
//! Pipeline failures short-circuit the remaining stages and surface as
//! `500 {"message": ...}`. Validation failures caught before any sidecar
//! call surface as `400 {"error": "invalid content"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of one pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Post reached save or publish without an id
    #[error("invalid content")]
    InvalidContent,

    /// Scoring service returned a non-success status
    #[error("error invoking service")]
    Scoring,

    /// State store returned a non-success status
    #[error("error saving content")]
    Save,

    /// Pub/sub returned a non-success status
    #[error("error publishing content")]
    Publish,

    /// Network failure or malformed response body
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Transport(err.to_string())
    }
}

/// Result type for pipeline stages
pub type PipelineResult<T> = Result<T, PipelineError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable request body (400)
    #[error("invalid content")]
    InvalidContent,

    /// Pipeline stage failure (500)
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl From<tsp_common::Error> for ApiError {
    fn from(err: tsp_common::Error) -> Self {
        match err {
            tsp_common::Error::InvalidContent => ApiError::InvalidContent,
            tsp_common::Error::Config(msg) => ApiError::Pipeline(PipelineError::Transport(msg)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidContent => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid content" }),
            ),
            ApiError::Pipeline(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": err.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
