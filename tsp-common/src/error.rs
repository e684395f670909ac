//! Common error types for TSP

use thiserror::Error;

/// Common result type for TSP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across TSP services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inbound payload is missing or lacks an identifier
    #[error("invalid content")]
    InvalidContent,
}
