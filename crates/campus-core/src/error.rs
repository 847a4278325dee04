//! Error types for campus-core

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Result type alias using campus-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in campus-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unknown resource family name
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
