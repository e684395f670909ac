//! Tweet ingestion endpoint
//!
//! POST /tweets: validate the tweet, then score, save and publish it.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{debug, error};
use tsp_common::{Post, TweetPayload};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /tweets
///
/// Returns `200 {}` once the post is scored, saved and published.
/// A missing, unparseable or id-less body is rejected with 400 before any
/// sidecar call.
pub async fn ingest_tweet(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    debug!("/tweets invoked...");

    let tweet = parse_tweet(&body)?;
    let post = Post::from_tweet(tweet)?;

    match state.pipeline.process(post).await {
        Ok(post) => {
            debug!("Stored and published {}", post.id);
            Ok(Json(json!({})))
        }
        Err(e) => {
            error!("{}", e);
            Err(ApiError::Pipeline(e))
        }
    }
}

/// Decode the request body; empty bodies and `null` count as missing
fn parse_tweet(body: &[u8]) -> ApiResult<TweetPayload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::InvalidContent);
    }

    serde_json::from_slice::<Option<TweetPayload>>(body)
        .map_err(|e| {
            debug!("Rejecting unparseable tweet body: {}", e);
            ApiError::InvalidContent
        })?
        .ok_or(ApiError::InvalidContent)
}

/// Build tweet ingestion routes
pub fn tweet_routes() -> Router<AppState> {
    Router::new().route("/tweets", post(ingest_tweet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_and_null() {
        assert!(matches!(parse_tweet(b""), Err(ApiError::InvalidContent)));
        assert!(matches!(parse_tweet(b"  \n"), Err(ApiError::InvalidContent)));
        assert!(matches!(parse_tweet(b"null"), Err(ApiError::InvalidContent)));
        assert!(matches!(parse_tweet(b"{not json"), Err(ApiError::InvalidContent)));
    }

    #[test]
    fn test_parse_accepts_object() {
        let tweet = parse_tweet(br#"{"id_str":"1","text":"hi"}"#).unwrap();
        assert_eq!(tweet.id_str.as_deref(), Some("1"));
        assert_eq!(tweet.text.as_deref(), Some("hi"));
    }
}
