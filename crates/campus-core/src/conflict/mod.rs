//! Classification of failed write operations.
//!
//! The server reports validation failures under an `errors` bag whose fields
//! may sit directly in the bag or one level down inside `errors.detail[0]`,
//! depending on which validation layer raised them. [`ErrorBag`] normalizes
//! both shapes once; every extractor reads through it, flat level first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::forms::FieldErrors;

/// Message used when a duplicate conflict carries no usable explanation.
pub const DEFAULT_DUPLICATE_MESSAGE: &str = "A deleted record with the same details already exists.";

/// Message used when a generic failure carries no usable explanation.
pub const DEFAULT_GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

const HAS_DELETED_DUPLICATE: &str = "has_deleted_duplicate";
const NON_FIELD_ERRORS: &str = "non_field_errors";
const DELETED_RECORD_ID: &str = "deleted_record_id";
const DETAIL: &str = "detail";

/// A create that collided with a soft-deleted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictError {
    pub is_duplicate_conflict: bool,
    pub message: String,
    pub deleted_record_id: Option<String>,
}

impl ConflictError {
    /// Derives the conflict view of an arbitrary error value.
    pub fn from_error(error: &Value) -> Self {
        Self {
            is_duplicate_conflict: is_deleted_duplicate_error(error),
            message: deleted_duplicate_message(error),
            deleted_record_id: deleted_record_id(error),
        }
    }

    /// Reactivation needs the identifier of the deleted record.
    pub const fn can_reactivate(&self) -> bool {
        self.is_duplicate_conflict && self.deleted_record_id.is_some()
    }
}

/// Outcome of classifying a failed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// Routed to the resolution dialog, never to a toast.
    DeletedDuplicate(ConflictError),
    /// Shown inline next to the form fields.
    FieldErrors(FieldErrors),
    /// Shown as a toast.
    Generic(String),
}

impl ErrorClass {
    pub const fn is_deleted_duplicate(&self) -> bool {
        matches!(self, Self::DeletedDuplicate(_))
    }
}

/// Classifies an error value. Duplicate detection takes precedence over
/// field errors carried in the same bag.
pub fn classify(error: &Value) -> ErrorClass {
    if is_deleted_duplicate_error(error) {
        let conflict = ConflictError::from_error(error);
        if conflict.deleted_record_id.is_none() {
            tracing::debug!("Deleted duplicate reported without a record id");
        }
        return ErrorClass::DeletedDuplicate(conflict);
    }

    if let Some(bag) = ErrorBag::locate(error) {
        let field_errors = FieldErrors::from_bag(&bag);
        if !field_errors.is_empty() {
            return ErrorClass::FieldErrors(field_errors);
        }
    }

    ErrorClass::Generic(generic_message(error))
}

/// True only when the bag carries a truthy `has_deleted_duplicate` marker at
/// the flat or nested level.
pub fn is_deleted_duplicate_error(error: &Value) -> bool {
    ErrorBag::locate(error).is_some_and(|bag| bag.lookup(HAS_DELETED_DUPLICATE).any(is_truthy_marker))
}

/// First `non_field_errors` entry, flat then nested, else the default sentence.
pub fn deleted_duplicate_message(error: &Value) -> String {
    ErrorBag::locate(error)
        .and_then(|bag| bag.lookup(NON_FIELD_ERRORS).find_map(first_message))
        .unwrap_or_else(|| DEFAULT_DUPLICATE_MESSAGE.to_string())
}

/// Public identifier of the soft-deleted record, flat then nested.
pub fn deleted_record_id(error: &Value) -> Option<String> {
    ErrorBag::locate(error)?
        .lookup(DELETED_RECORD_ID)
        .find_map(identifier)
}

/// Best-effort human message for errors that are neither duplicates nor
/// field errors.
pub fn generic_message(error: &Value) -> String {
    let from_bag = ErrorBag::locate(error).and_then(|bag| {
        bag.flat
            .get(DETAIL)
            .and_then(non_empty_str)
            .or_else(|| bag.flat.get("message").and_then(non_empty_str))
    });

    from_bag
        .or_else(|| error.get("message").and_then(non_empty_str))
        .or_else(|| error.get(DETAIL).and_then(non_empty_str))
        .or_else(|| error.get("errors").and_then(first_listed_message))
        .or_else(|| first_listed_message(error))
        .or_else(|| non_empty_str(error))
        .unwrap_or(DEFAULT_GENERIC_MESSAGE)
        .to_string()
}

/// The `errors` bag of an error value, with its optional `detail[0]` wrapper.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorBag<'a> {
    pub(crate) flat: &'a Map<String, Value>,
    pub(crate) nested: Option<&'a Map<String, Value>>,
}

impl<'a> ErrorBag<'a> {
    /// Finds the bag at `errors`, then at `response.errors`.
    ///
    /// `response.errors` is only consulted when `errors` is absent or null.
    pub(crate) fn locate(error: &'a Value) -> Option<Self> {
        let flat = match error.get("errors") {
            None | Some(Value::Null) => error
                .get("response")
                .and_then(|response| response.get("errors"))
                .and_then(Value::as_object),
            Some(errors) => errors.as_object(),
        }?;

        let nested = flat
            .get(DETAIL)
            .and_then(Value::as_array)
            .and_then(|detail| detail.first())
            .and_then(Value::as_object);

        Some(Self { flat, nested })
    }

    /// Values stored under `field`, flat level first.
    pub(crate) fn lookup(&self, field: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        let flat = self.flat.get(field);
        let nested = self.nested.and_then(|nested| nested.get(field));
        flat.into_iter().chain(nested)
    }
}

// Some endpoints send the marker as the string "True".
fn is_truthy_marker(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => {
            let matched = text == "True";
            if matched {
                tracing::debug!("has_deleted_duplicate reported as string \"True\"");
            }
            matched
        }
        _ => false,
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::Array(messages) => messages.first().and_then(non_empty_str).map(str::to_string),
        other => non_empty_str(other).map(str::to_string),
    }
}

// Bare message lists, e.g. `["Holiday overlaps an existing holiday."]`.
fn first_listed_message(value: &Value) -> Option<&str> {
    value.as_array()?.iter().find_map(non_empty_str)
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => {
            let id = id.trim();
            (!id.is_empty()).then(|| id.to_string())
        }
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn malformed_inputs() -> Vec<Value> {
        vec![
            Value::Null,
            json!(true),
            json!(17),
            json!("boom"),
            json!([]),
            json!({}),
            json!({ "errors": null }),
            json!({ "errors": "nope" }),
            json!({ "errors": [] }),
            json!({ "errors": { "detail": "Not found." } }),
            json!({ "errors": { "detail": [] } }),
            json!({ "errors": { "detail": [null, 3] } }),
            json!({ "errors": { "non_field_errors": [] } }),
            json!({ "errors": { "non_field_errors": [42] } }),
            json!({ "errors": { "non_field_errors": "  " } }),
            json!({ "response": null }),
            json!({ "response": { "errors": 5 } }),
        ]
    }

    #[test]
    fn flat_duplicate_is_classified_with_message_and_id() {
        let error = json!({
            "errors": {
                "has_deleted_duplicate": true,
                "non_field_errors": ["A teacher with this email already exists (deleted)."],
                "deleted_record_id": "abc-123",
            }
        });

        assert!(is_deleted_duplicate_error(&error));
        assert_eq!(
            classify(&error),
            ErrorClass::DeletedDuplicate(ConflictError {
                is_duplicate_conflict: true,
                message: "A teacher with this email already exists (deleted).".to_string(),
                deleted_record_id: Some("abc-123".to_string()),
            })
        );
    }

    #[test]
    fn nested_detail_duplicate_with_string_marker() {
        let error = json!({
            "errors": {
                "detail": [{ "has_deleted_duplicate": "True", "deleted_record_id": "xyz-9" }]
            }
        });

        let conflict = ConflictError::from_error(&error);
        assert!(conflict.is_duplicate_conflict);
        assert_eq!(conflict.deleted_record_id.as_deref(), Some("xyz-9"));
        assert_eq!(conflict.message, DEFAULT_DUPLICATE_MESSAGE);
        assert!(conflict.can_reactivate());
    }

    #[test]
    fn bag_under_response_is_found() {
        let error = json!({
            "response": {
                "errors": {
                    "has_deleted_duplicate": true,
                    "non_field_errors": ["Subject code already used by a deleted subject."],
                }
            }
        });

        assert!(is_deleted_duplicate_error(&error));
        assert_eq!(
            deleted_duplicate_message(&error),
            "Subject code already used by a deleted subject."
        );
        assert_eq!(deleted_record_id(&error), None);
    }

    #[test]
    fn flat_fields_take_precedence_over_nested() {
        let error = json!({
            "errors": {
                "has_deleted_duplicate": true,
                "non_field_errors": ["flat message"],
                "deleted_record_id": "flat-id",
                "detail": [{
                    "non_field_errors": ["nested message"],
                    "deleted_record_id": "nested-id",
                }],
            }
        });

        assert_eq!(deleted_duplicate_message(&error), "flat message");
        assert_eq!(deleted_record_id(&error).as_deref(), Some("flat-id"));
    }

    #[test]
    fn nested_message_used_when_flat_missing() {
        let error = json!({
            "errors": {
                "detail": [{
                    "has_deleted_duplicate": true,
                    "non_field_errors": ["nested message"],
                    "deleted_record_id": 77,
                }],
            }
        });

        assert_eq!(deleted_duplicate_message(&error), "nested message");
        assert_eq!(deleted_record_id(&error).as_deref(), Some("77"));
    }

    #[test]
    fn false_like_markers_are_not_duplicates() {
        for marker in [json!(false), json!("true"), json!("False"), json!(1), json!(null)] {
            let error = json!({ "errors": { "has_deleted_duplicate": marker } });
            assert!(!is_deleted_duplicate_error(&error), "marker {marker} matched");
        }
    }

    #[test]
    fn missing_errors_bag_is_never_a_duplicate() {
        for error in malformed_inputs() {
            assert!(!is_deleted_duplicate_error(&error), "{error} matched");
        }
        assert!(!is_deleted_duplicate_error(
            &json!({ "has_deleted_duplicate": true })
        ));
    }

    #[test]
    fn extractors_never_fail_on_malformed_input() {
        for error in malformed_inputs() {
            assert!(!deleted_duplicate_message(&error).is_empty());
            assert_eq!(deleted_record_id(&error), None, "{error} yielded an id");
            assert!(!generic_message(&error).is_empty());
        }
    }

    #[test]
    fn missing_id_keeps_duplicate_classification() {
        let error = json!({ "errors": { "has_deleted_duplicate": true } });
        let ErrorClass::DeletedDuplicate(conflict) = classify(&error) else {
            panic!("expected a duplicate classification");
        };
        assert!(conflict.is_duplicate_conflict);
        assert!(!conflict.can_reactivate());
    }

    #[test]
    fn field_validation_errors_are_not_duplicates() {
        let error = json!({ "errors": { "email": ["Enter a valid email address."] } });

        assert!(!is_deleted_duplicate_error(&error));
        let ErrorClass::FieldErrors(fields) = classify(&error) else {
            panic!("expected field errors");
        };
        assert_eq!(fields.first("email"), Some("Enter a valid email address."));
    }

    #[test]
    fn duplicate_wins_over_field_errors_in_same_bag() {
        let error = json!({
            "errors": {
                "has_deleted_duplicate": "True",
                "email": ["taken"],
            }
        });
        assert!(classify(&error).is_deleted_duplicate());
    }

    #[test]
    fn generic_errors_keep_best_available_message() {
        assert_eq!(
            classify(&json!({ "errors": { "detail": "Permission denied." } })),
            ErrorClass::Generic("Permission denied.".to_string())
        );
        assert_eq!(
            classify(&json!({ "message": "connection reset" })),
            ErrorClass::Generic("connection reset".to_string())
        );
        assert_eq!(
            classify(&Value::Null),
            ErrorClass::Generic(DEFAULT_GENERIC_MESSAGE.to_string())
        );
    }

    #[test]
    fn generic_errors_read_bare_message_lists() {
        assert_eq!(
            classify(&json!({ "status": 400, "errors": ["", "Holiday overlaps an existing holiday."] })),
            ErrorClass::Generic("Holiday overlaps an existing holiday.".to_string())
        );
        assert_eq!(
            generic_message(&json!(["Term dates are locked."])),
            "Term dates are locked."
        );
        assert_eq!(
            generic_message(&json!({ "errors": [42, null] })),
            DEFAULT_GENERIC_MESSAGE
        );
    }

    #[test]
    fn response_errors_are_used_only_when_errors_is_missing() {
        let nested = json!({
            "response": { "errors": { "has_deleted_duplicate": true, "deleted_record_id": 7 } }
        });
        assert!(is_deleted_duplicate_error(&nested));
        assert_eq!(deleted_record_id(&nested), Some("7".to_string()));

        let null_errors = json!({
            "errors": null,
            "response": { "errors": { "has_deleted_duplicate": true } }
        });
        assert!(is_deleted_duplicate_error(&null_errors));

        let shadowed = json!({
            "errors": "Service unavailable",
            "response": { "errors": { "has_deleted_duplicate": true, "deleted_record_id": 7 } }
        });
        assert!(!is_deleted_duplicate_error(&shadowed));
        assert_eq!(deleted_record_id(&shadowed), None);
    }
}
