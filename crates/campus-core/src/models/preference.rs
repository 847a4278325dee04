//! Organization preference payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{require_text, ResourcePayload};
use super::ResourceKind;
use crate::error::{Error, Result};

/// A single organization-wide setting, e.g. `academic_year_start_month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationPreference {
    pub key: String,
    pub value: Value,
}

impl ResourcePayload for OrganizationPreference {
    const KIND: ResourceKind = ResourceKind::OrganizationPreferences;

    fn validate(&self) -> Result<()> {
        require_text("key", &self.key)?;
        if self.value.is_null() {
            return Err(Error::InvalidInput("value is required".to_string()));
        }
        Ok(())
    }
}
