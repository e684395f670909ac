//! Sidecar HTTP client
//!
//! Thin wrappers over the sidecar's service invocation, state and pub/sub
//! APIs. Each call is one POST with a JSON body; any non-success status maps
//! to a fixed per-stage error and is never retried.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use tsp_common::{Post, SidecarConfig};

use crate::error::{PipelineError, PipelineResult};

/// Scoring request body
#[derive(Debug, Serialize)]
pub struct ScoreRequest<'a> {
    pub lang: &'a str,
    pub text: &'a str,
}

/// Scoring response body
#[derive(Debug, Deserialize)]
pub struct ScoreResponse {
    pub score: f64,
}

/// One key/value pair in a state store write
#[derive(Debug, Serialize)]
pub struct StateEntry<'a> {
    pub key: &'a str,
    pub value: &'a Post,
}

/// Client for the local sidecar
#[derive(Clone)]
pub struct SidecarClient {
    http_client: Client,
    config: SidecarConfig,
}

impl SidecarClient {
    pub fn new(config: SidecarConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    /// Request a sentiment score for the post's content
    pub async fn score(&self, post: &Post) -> PipelineResult<f64> {
        let body = ScoreRequest {
            lang: &post.language,
            text: &post.content,
        };
        let response = self.post_json(self.config.scoring_url(), &body).await?;

        if !response.status().is_success() {
            log_status(&response);
            return Err(PipelineError::Scoring);
        }

        let parsed: ScoreResponse = response.json().await.map_err(|e| {
            debug!("Malformed scoring response: {}", e);
            PipelineError::from(e)
        })?;
        debug!("Scoring response for {}: {}", post.id, parsed.score);

        Ok(parsed.score)
    }

    /// Write the post to the state store, keyed by its id
    pub async fn save(&self, post: &Post) -> PipelineResult<()> {
        if !post.has_id() {
            return Err(PipelineError::InvalidContent);
        }

        let state = [StateEntry {
            key: &post.id,
            value: post,
        }];
        let response = self.post_json(self.config.state_url(), &state).await?;

        if !response.status().is_success() {
            log_status(&response);
            return Err(PipelineError::Save);
        }

        Ok(())
    }

    /// Publish the post to the processed topic
    pub async fn publish(&self, post: &Post) -> PipelineResult<()> {
        if !post.has_id() {
            return Err(PipelineError::InvalidContent);
        }

        let response = self.post_json(self.config.publish_url(), post).await?;

        if !response.status().is_success() {
            log_status(&response);
            return Err(PipelineError::Publish);
        }

        Ok(())
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: String,
        body: &T,
    ) -> PipelineResult<Response> {
        self.http_client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                PipelineError::from(e)
            })
    }
}

fn log_status(response: &Response) {
    let status = response.status();
    debug!(
        "Sidecar {} returned {}",
        response.url(),
        status.canonical_reason().unwrap_or(status.as_str())
    );
}
