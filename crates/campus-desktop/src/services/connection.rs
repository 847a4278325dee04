//! API connection from environment configuration

use std::sync::Arc;

use campus_core::api::{ApiClient, ApiError};
use campus_core::config::{ClientConfig, ConfigError};
use campus_core::session::Role;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A configured client plus the role that scopes the dashboard.
#[derive(Debug, Clone)]
pub struct Connection {
    pub client: Arc<ApiClient>,
    pub role: Role,
}

/// Builds the API client from `CAMPUS_*` variables (and `.env`).
pub fn connect() -> Result<Connection, DesktopError> {
    connect_with(&ClientConfig::from_env()?)
}

pub fn connect_with(config: &ClientConfig) -> Result<Connection, DesktopError> {
    if config.access_token.is_none() {
        tracing::warn!("CAMPUS_API_TOKEN is not set; requests will be unauthenticated");
    }
    let client = ApiClient::new(config)?;
    tracing::info!(
        base_url = %client.base_url(),
        role = %config.role,
        "Connected to school management API"
    );
    Ok(Connection {
        client: Arc::new(client),
        role: config.role,
    })
}
