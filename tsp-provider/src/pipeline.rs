//! Score → save → publish pipeline
//!
//! Stages run strictly in sequence; the first failure aborts the rest.
//! Nothing is rolled back: a publish failure leaves the saved post in place.

use tracing::debug;
use tsp_common::Post;

use crate::error::PipelineResult;
use crate::sidecar::SidecarClient;

#[derive(Clone)]
pub struct Pipeline {
    client: SidecarClient,
}

impl Pipeline {
    pub fn new(client: SidecarClient) -> Self {
        Self { client }
    }

    /// Run one post through all three stages, returning the scored post
    pub async fn process(&self, mut post: Post) -> PipelineResult<Post> {
        let score = self.client.score(&post).await?;
        post.apply_score(score);

        self.client.save(&post).await?;
        self.client.publish(&post).await?;

        debug!("Processed post {} (sentiment {})", post.id, post.sentiment);
        Ok(post)
    }
}
