//! # TSP Common Library
//!
//! Shared code for the tweet sentiment provider services including:
//! - Post and inbound tweet payload types
//! - Configuration loading (CLI → ENV → TOML → defaults)
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use config::{ConfigOverrides, ConfigResolver, ProviderConfig, SidecarConfig};
pub use error::{Error, Result};
pub use models::{Post, TweetPayload, TweetUser, DEFAULT_SENTIMENT};
