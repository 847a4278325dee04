//! Records and pages returned by the REST API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Paginated collection envelope returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// A server record of any resource family.
///
/// The public identifier is kept apart; every other attribute stays as
/// loosely-typed JSON so list views can render any family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "deserialize_public_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

const NAME_FIELDS: [&str; 3] = ["name", "full_name", "title"];
const FALLBACK_FIELDS: [&str; 3] = ["email", "code", "key"];

impl Record {
    /// Best-effort label for a record: a name-like field, then first/last
    /// name, then an email/code/key, then the identifier.
    #[must_use]
    pub fn display_name(&self) -> String {
        for field in NAME_FIELDS {
            if let Some(value) = self.text_field(field) {
                return value.to_string();
            }
        }

        let first = self.text_field("first_name");
        let last = self.text_field("last_name");
        match (first, last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => FALLBACK_FIELDS
                .iter()
                .find_map(|field| self.text_field(field))
                .map_or_else(|| self.id.clone(), str::to_string),
        }
    }

    /// Returns a non-empty string field
    pub fn text_field(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.fields
            .get("is_active")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

fn deserialize_public_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "record id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn record_accepts_numeric_and_string_ids() {
        let numeric: Record = serde_json::from_value(json!({ "id": 42, "name": "Art" })).unwrap();
        assert_eq!(numeric.id, "42");

        let public: Record =
            serde_json::from_value(json!({ "id": "abc-123", "name": "Art" })).unwrap();
        assert_eq!(public.id, "abc-123");
        assert_eq!(public.fields.get("name"), Some(&json!("Art")));
    }

    #[test]
    fn display_name_prefers_named_fields_then_person_names() {
        let subject: Record =
            serde_json::from_value(json!({ "id": "1", "name": "Physics", "code": "PHY" })).unwrap();
        assert_eq!(subject.display_name(), "Physics");

        let teacher: Record = serde_json::from_value(json!({
            "id": "2",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@school.example",
        }))
        .unwrap();
        assert_eq!(teacher.display_name(), "Ada Lovelace");

        let preference: Record =
            serde_json::from_value(json!({ "id": "4", "key": "term_length" })).unwrap();
        assert_eq!(preference.display_name(), "term_length");

        let bare: Record = serde_json::from_value(json!({ "id": "3", "name": "  " })).unwrap();
        assert_eq!(bare.display_name(), "3");
    }

    #[test]
    fn page_defaults_missing_envelope_fields() {
        let page: Page<Record> =
            serde_json::from_value(json!({ "results": [{ "id": "1" }] })).unwrap();
        assert_eq!(page.count, 0);
        assert!(!page.has_next());
        assert_eq!(page.results.len(), 1);
    }
}
