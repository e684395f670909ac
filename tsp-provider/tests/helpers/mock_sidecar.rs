//! Mock sidecar for integration tests
//!
//! Serves the scoring, state and publish endpoints on an ephemeral local port
//! and records every call in arrival order.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tsp_common::SidecarConfig;

/// Which sidecar API a call hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Score,
    Save,
    Publish,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub stage: Stage,
    pub body: Value,
}

/// Canned responses per endpoint
#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub score_status: StatusCode,
    /// Raw scoring response body (may be deliberately malformed)
    pub score_body: String,
    pub save_status: StatusCode,
    pub publish_status: StatusCode,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            score_status: StatusCode::OK,
            score_body: r#"{"score":0.5}"#.to_string(),
            save_status: StatusCode::NO_CONTENT,
            publish_status: StatusCode::NO_CONTENT,
        }
    }
}

impl MockBehavior {
    pub fn with_score(score: f64) -> Self {
        Self {
            score_body: format!(r#"{{"score":{}}}"#, score),
            ..Self::default()
        }
    }
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    behavior: Arc<MockBehavior>,
}

impl MockState {
    fn record(&self, stage: Stage, body: Value) {
        self.calls.lock().unwrap().push(RecordedCall { stage, body });
    }
}

/// Running mock sidecar
pub struct MockSidecar {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockSidecar {
    /// Start a mock sidecar with the given behavior on 127.0.0.1:0
    pub async fn start(behavior: MockBehavior) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: Arc::clone(&calls),
            behavior: Arc::new(behavior),
        };

        let app = Router::new()
            .route("/v1.0/invoke/processor/method/sentiment-score", post(score))
            .route("/v1.0/state/tweet-store", post(save))
            .route("/v1.0/publish/processed/processed", post(publish))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, calls }
    }

    /// Sidecar config pointing at this mock
    pub fn config(&self) -> SidecarConfig {
        SidecarConfig::at("127.0.0.1", self.addr.port())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.calls().into_iter().map(|c| c.stage).collect()
    }

    /// Body of the first call to `stage`, if any
    pub fn body_for(&self, stage: Stage) -> Option<Value> {
        self.calls()
            .into_iter()
            .find(|c| c.stage == stage)
            .map(|c| c.body)
    }
}

/// Sidecar config for a port with nothing listening
pub async fn unreachable_config() -> SidecarConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    SidecarConfig::at("127.0.0.1", port)
}

async fn score(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.record(Stage::Score, body);
    (
        state.behavior.score_status,
        [("content-type", "application/json")],
        state.behavior.score_body.clone(),
    )
        .into_response()
}

async fn save(State(state): State<MockState>, Json(body): Json<Value>) -> StatusCode {
    state.record(Stage::Save, body);
    state.behavior.save_status
}

async fn publish(State(state): State<MockState>, Json(body): Json<Value>) -> StatusCode {
    state.record(Stage::Publish, body);
    state.behavior.publish_status
}
