//! HTTP API handlers for tsp-provider

pub mod health;
pub mod tweets;

pub use health::health_routes;
pub use tweets::tweet_routes;
