//! tsp-provider library - tweet ingestion service
//!
//! Receives tweets over HTTP, scores their sentiment through the sidecar's
//! service invocation API, saves them to the state store and publishes them
//! to the processed topic.

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;
use tsp_common::SidecarConfig;

pub mod api;
pub mod error;
pub mod pipeline;
pub mod sidecar;

pub use crate::error::{ApiError, ApiResult, PipelineError, PipelineResult};
pub use crate::pipeline::Pipeline;
pub use crate::sidecar::SidecarClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create application state talking to the given sidecar
    pub fn new(sidecar: SidecarConfig) -> Self {
        Self {
            pipeline: Pipeline::new(SidecarClient::new(sidecar)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::tweet_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
