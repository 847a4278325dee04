use std::io;

use campus_core::api::ApiError;
use campus_core::config::ConfigError;
use campus_core::resolution::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] campus_core::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No request body provided. Pass --data '<json>' or pipe JSON on stdin.")]
    EmptyPayload,
    #[error("Record ID cannot be empty")]
    EmptyRecordId,
    #[error("{0} records cannot be reactivated")]
    ReactivationUnsupported(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("{0} record was not created")]
    CreateIncomplete(String),
    #[error("Reactivation failed: {0}")]
    ReactivateFailed(String),
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}
