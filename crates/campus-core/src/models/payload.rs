//! Create payloads and their shared validation helpers

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{
    NewClass, NewHoliday, NewLeaveAllocation, NewStudent, NewSubject, NewTeacher,
    OrganizationPreference, ResourceKind,
};
use crate::error::{Error, Result};

/// A typed request body for one resource family's create endpoint
pub trait ResourcePayload: Serialize {
    const KIND: ResourceKind;

    /// Client-side checks for required fields; the server stays the source
    /// of truth for everything else.
    fn validate(&self) -> Result<()>;

    fn to_value(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Checks an untyped body against the typed payload for `kind` and returns
/// the normalized body.
pub fn validate_payload(kind: ResourceKind, body: Value) -> Result<Value> {
    match kind {
        ResourceKind::Teachers => typed::<NewTeacher>(body),
        ResourceKind::Classes => typed::<NewClass>(body),
        ResourceKind::Students => typed::<NewStudent>(body),
        ResourceKind::Subjects => typed::<NewSubject>(body),
        ResourceKind::LeaveAllocations => typed::<NewLeaveAllocation>(body),
        ResourceKind::Holidays => typed::<NewHoliday>(body),
        ResourceKind::OrganizationPreferences => typed::<OrganizationPreference>(body),
    }
}

fn typed<P: ResourcePayload + DeserializeOwned>(body: Value) -> Result<Value> {
    if !body.is_object() {
        return Err(Error::InvalidInput(format!(
            "{} payload must be a JSON object",
            P::KIND.label()
        )));
    }
    let payload: P = serde_json::from_value(body)
        .map_err(|error| Error::InvalidInput(format!("{}: {error}", P::KIND.label())))?;
    payload.to_value()
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_email(field: &str, value: &str) -> Result<()> {
    require_text(field, value)?;
    let value = value.trim();
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must be a valid email address"
        )))
    }
}

pub(crate) fn optional_email(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) if !value.trim().is_empty() => require_email(field, value),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn validate_payload_normalizes_known_fields() {
        let body = validate_payload(
            ResourceKind::Teachers,
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@school.example",
                "nickname": "dropped",
            }),
        )
        .unwrap();

        assert_eq!(
            body,
            json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada@school.example" })
        );
    }

    #[test]
    fn validate_payload_reports_missing_and_blank_fields() {
        let missing = validate_payload(ResourceKind::Teachers, json!({ "first_name": "Ada" }));
        assert!(matches!(missing, Err(Error::InvalidInput(message)) if message.contains("last_name")));

        let blank = validate_payload(
            ResourceKind::Subjects,
            json!({ "name": " ", "code": "MTH" }),
        );
        assert!(matches!(blank, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn validate_payload_rejects_non_objects() {
        let result = validate_payload(ResourceKind::Holidays, json!(["2026-01-01"]));
        assert!(matches!(result, Err(Error::InvalidInput(message)) if message.contains("object")));
    }
}
