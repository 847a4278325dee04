//! Client configuration shared by the CLI and desktop front ends.
//!
//! Values are resolved from explicit overrides first, then from the
//! `CAMPUS_*` environment variables. Binaries load `.env` before resolving.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{ClientContext, Role};
use crate::util::{is_http_url, normalize_text_option};

pub const ENV_API_BASE_URL: &str = "CAMPUS_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "CAMPUS_API_TOKEN";
pub const ENV_ORGANIZATION_ID: &str = "CAMPUS_ORGANIZATION_ID";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CAMPUS_REQUEST_TIMEOUT_SECS";
pub const ENV_ROLE: &str = "CAMPUS_ROLE";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL is not configured. Set CAMPUS_API_BASE_URL or run `campus config init`.")]
    MissingBaseUrl,
    #[error("API base URL must include http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Resolved configuration for talking to the school management API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub role: Role,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("organization_id", &self.organization_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("role", &self.role)
            .finish()
    }
}

/// Optional values from flags, profiles, or the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub access_token: Option<String>,
    pub organization_id: Option<String>,
    pub request_timeout_secs: Option<String>,
    pub role: Option<String>,
}

impl ConfigOverrides {
    /// Reads the `CAMPUS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds overrides from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: lookup(ENV_API_BASE_URL),
            access_token: lookup(ENV_API_TOKEN),
            organization_id: lookup(ENV_ORGANIZATION_ID),
            request_timeout_secs: lookup(ENV_REQUEST_TIMEOUT_SECS),
            role: lookup(ENV_ROLE),
        }
    }

    /// Fills every unset value from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            api_base_url: normalize_text_option(self.api_base_url)
                .or_else(|| normalize_text_option(fallback.api_base_url)),
            access_token: normalize_text_option(self.access_token)
                .or_else(|| normalize_text_option(fallback.access_token)),
            organization_id: normalize_text_option(self.organization_id)
                .or_else(|| normalize_text_option(fallback.organization_id)),
            request_timeout_secs: normalize_text_option(self.request_timeout_secs)
                .or_else(|| normalize_text_option(fallback.request_timeout_secs)),
            role: normalize_text_option(self.role).or_else(|| normalize_text_option(fallback.role)),
        }
    }

    pub fn resolve(self) -> Result<ClientConfig, ConfigError> {
        let api_base_url = normalize_text_option(self.api_base_url)
            .ok_or(ConfigError::MissingBaseUrl)
            .and_then(|url| normalize_base_url(&url))?;

        let request_timeout_secs = match normalize_text_option(self.request_timeout_secs) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let role = match normalize_text_option(self.role) {
            Some(raw) => raw.parse::<Role>().map_err(|error| ConfigError::InvalidValue {
                field: "role",
                reason: error.to_string(),
            })?,
            None => Role::default(),
        };

        Ok(ClientConfig {
            api_base_url,
            access_token: normalize_text_option(self.access_token),
            organization_id: normalize_text_option(self.organization_id),
            request_timeout_secs,
            role,
        })
    }
}

impl ClientConfig {
    /// Resolves configuration from the environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigOverrides::from_env().resolve()
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Caller context derived from this configuration.
    pub fn context(&self) -> ClientContext {
        ClientContext {
            access_token: self.access_token.clone(),
            organization_id: self.organization_id.clone(),
            role: self.role,
        }
    }
}

/// Trims whitespace and trailing slashes; requires an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }
    if !is_http_url(trimmed) {
        return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field: "request timeout",
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(secs),
        Err(error) => Err(ConfigError::InvalidValue {
            field: "request timeout",
            reason: error.to_string(),
        }),
    }
}
