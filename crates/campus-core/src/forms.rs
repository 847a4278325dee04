//! Mapping of server validation bags onto form fields.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::conflict::ErrorBag;

/// Keys in an errors bag that never name a form field.
const RESERVED_KEYS: [&str; 4] = [
    "detail",
    "non_field_errors",
    "has_deleted_duplicate",
    "deleted_record_id",
];

/// Field-keyed validation messages plus messages not tied to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FieldErrors {
    /// Maps an error value through its `errors` bag; empty when there is none.
    pub fn from_error(error: &Value) -> Self {
        ErrorBag::locate(error).map_or_else(Self::default, |bag| Self::from_bag(&bag))
    }

    pub(crate) fn from_bag(bag: &ErrorBag<'_>) -> Self {
        let mut errors = Self::default();
        errors.collect_object(bag.flat);
        if errors.fields.is_empty() {
            if let Some(nested) = bag.nested {
                errors.collect_object(nested);
            }
        }

        for value in bag.lookup("non_field_errors") {
            collect_messages(value, &mut errors.non_field);
            if !errors.non_field.is_empty() {
                break;
            }
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// First message for a field, as displayed under the input.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Records a client-side validation message for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    fn collect_object(&mut self, object: &Map<String, Value>) {
        for (field, value) in object {
            if RESERVED_KEYS.contains(&field.as_str()) {
                continue;
            }
            self.collect_field(field, value);
        }
    }

    fn collect_field(&mut self, field: &str, value: &Value) {
        match value {
            Value::Object(children) => {
                for (child, child_value) in children {
                    self.collect_field(&format!("{field}.{child}"), child_value);
                }
            }
            Value::Array(items) if items.iter().any(Value::is_object) => {
                for (index, item) in items.iter().enumerate() {
                    if item.is_object() {
                        self.collect_field(&format!("{field}.{index}"), item);
                    }
                }
            }
            other => {
                let mut messages = Vec::new();
                collect_messages(other, &mut messages);
                if !messages.is_empty() {
                    self.fields
                        .entry(field.to_string())
                        .or_default()
                        .extend(messages);
                }
            }
        }
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(message) if !message.trim().is_empty() => {
            out.push(message.trim().to_string());
        }
        Value::Array(items) => {
            for item in items {
                collect_messages(item, out);
            }
        }
        _ => {}
    }
}
