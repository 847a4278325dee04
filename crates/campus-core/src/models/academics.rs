//! Class and subject payloads

use serde::{Deserialize, Serialize};

use super::payload::{require_text, ResourcePayload};
use super::ResourceKind;
use crate::error::{Error, Result};

/// Body for `POST /classes/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_teacher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl ResourcePayload for NewClass {
    const KIND: ResourceKind = ResourceKind::Classes;

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if self.capacity == Some(0) {
            return Err(Error::InvalidInput(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body for `POST /subjects/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
}

impl ResourcePayload for NewSubject {
    const KIND: ResourceKind = ResourceKind::Subjects;

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("code", &self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_rejects_zero_capacity() {
        let class = NewClass {
            name: "Grade 5".to_string(),
            section: Some("B".to_string()),
            class_teacher_id: None,
            capacity: Some(0),
        };
        assert!(class.validate().is_err());
    }

    #[test]
    fn subject_requires_code() {
        let subject = NewSubject {
            name: "Chemistry".to_string(),
            code: " ".to_string(),
        };
        let error = subject.validate().unwrap_err();
        assert_eq!(error.to_string(), "Invalid input: code is required");
    }
}
