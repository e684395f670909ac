//! Post and inbound tweet payload types
//!
//! `TweetPayload` mirrors the subset of the social platform's tweet JSON that
//! the provider reads. Every field is optional; validation happens once in
//! [`Post::from_tweet`] and produces either a well-typed [`Post`] or
//! [`Error::InvalidContent`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Neutral sentiment assigned before scoring
pub const DEFAULT_SENTIMENT: f64 = 0.5;

/// Author block of an inbound tweet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetUser {
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

/// Inbound tweet payload (POST /tweets body)
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetPayload {
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub user: Option<TweetUser>,
    /// Extended text, present on tweets longer than the legacy limit
    #[serde(default)]
    pub full_text: Option<String>,
    /// Legacy (possibly truncated) text
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Canonical post record forwarded to the scoring, state and publish sidecar APIs
///
/// Serialized field names (`author_pic`, `lang`) match what downstream
/// subscribers of the processed topic already read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Source tweet id, also the state store key
    pub id: String,
    pub author: String,
    #[serde(rename = "author_pic", skip_serializing_if = "Option::is_none")]
    pub author_picture: Option<String>,
    pub content: String,
    #[serde(rename = "lang")]
    pub language: String,
    /// Original creation timestamp, passed through untouched
    pub published: String,
    pub sentiment: f64,
}

impl Post {
    /// Build a post from an inbound tweet
    ///
    /// Fails with [`Error::InvalidContent`] when `id_str` is absent or blank.
    /// `content` prefers `full_text` over `text`; an empty result is
    /// forwarded as-is.
    pub fn from_tweet(tweet: TweetPayload) -> Result<Self> {
        let id = tweet
            .id_str
            .filter(|id| !id.trim().is_empty())
            .ok_or(Error::InvalidContent)?;

        let user = tweet.user.unwrap_or_default();

        let content = tweet
            .full_text
            .filter(|text| !text.is_empty())
            .or(tweet.text)
            .unwrap_or_default();

        if content.is_empty() {
            warn!("Tweet {} has no text content, forwarding empty content", id);
        }

        Ok(Self {
            id,
            author: user.screen_name.unwrap_or_default(),
            author_picture: user.profile_image_url_https,
            content,
            language: tweet.lang.unwrap_or_default(),
            published: tweet.created_at.unwrap_or_default(),
            sentiment: DEFAULT_SENTIMENT,
        })
    }

    /// Overwrite the default sentiment with a score from the scoring service
    pub fn apply_score(&mut self, score: f64) {
        self.sentiment = score;
    }

    /// True when the post can be keyed in the state store
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}
