//! Teacher and student payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::payload::{optional_email, require_email, require_text, ResourcePayload};
use super::ResourceKind;
use crate::error::Result;

/// Body for `POST /teachers/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<NaiveDate>,
}

impl ResourcePayload for NewTeacher {
    const KIND: ResourceKind = ResourceKind::Teachers;

    fn validate(&self) -> Result<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_email("email", &self.email)
    }
}

/// Body for `POST /students/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub admission_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

impl ResourcePayload for NewStudent {
    const KIND: ResourceKind = ResourceKind::Students;

    fn validate(&self) -> Result<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("admission_number", &self.admission_number)?;
        optional_email("guardian_email", self.guardian_email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn teacher() -> NewTeacher {
        NewTeacher {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@school.example".to_string(),
            phone: None,
            subject_ids: Vec::new(),
            joined_on: NaiveDate::from_ymd_opt(2024, 8, 1),
        }
    }

    #[test]
    fn teacher_serializes_without_empty_optionals() {
        let value = teacher().to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@school.example",
                "joined_on": "2024-08-01",
            })
        );
    }

    #[test]
    fn teacher_rejects_invalid_email() {
        let mut payload = teacher();
        payload.email = "not-an-email".to_string();
        let error = payload.validate().unwrap_err();
        assert!(error.to_string().contains("email"));
    }

    #[test]
    fn student_guardian_email_is_optional_but_checked() {
        let mut student = NewStudent {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            admission_number: "A-17".to_string(),
            class_id: None,
            guardian_email: None,
            date_of_birth: None,
        };
        assert!(student.validate().is_ok());

        student.guardian_email = Some("broken@".to_string());
        assert!(student.validate().is_err());
    }
}
