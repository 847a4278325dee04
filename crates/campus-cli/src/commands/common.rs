use std::io::{self, IsTerminal, Read};

use campus_core::api::ApiClient;
use campus_core::config::{ClientConfig, ConfigOverrides};
use campus_core::notify::{Toast, ToastLevel, ToastQueue};
use campus_core::util::normalize_text_option;
use campus_core::Record;
use serde::Serialize;
use serde_json::Value;

use crate::auth::TokenStore;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

const NAME_COLUMN_WIDTH: usize = 36;

#[derive(Debug, Serialize)]
pub struct RecordListItem {
    pub id: String,
    pub name: String,
    pub active: bool,
}

/// Client configuration for the selected profile.
///
/// `CAMPUS_*` variables win over the profile; the token falls back to the
/// keychain when `CAMPUS_API_TOKEN` is unset.
pub fn resolve_client_config(global_profile: Option<&str>) -> Result<ClientConfig, CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = profiles.resolve_profile_name(global_profile);
    let profile_overrides = profiles
        .profile(&profile_name)
        .map(CliProfile::overrides)
        .unwrap_or_default();

    let mut overrides = ConfigOverrides::from_env().or(profile_overrides);
    if normalize_text_option(overrides.access_token.clone()).is_none() {
        overrides.access_token = TokenStore::new(&profile_name).load()?;
    }

    let config = overrides.resolve()?;
    tracing::debug!(profile = %profile_name, ?config, "Resolved client configuration");
    Ok(config)
}

pub fn build_client(global_profile: Option<&str>) -> Result<ApiClient, CliError> {
    let config = resolve_client_config(global_profile)?;
    if config.access_token.is_none() {
        tracing::warn!("No API token configured; requests will be sent unauthenticated");
    }
    Ok(ApiClient::new(&config)?)
}

pub fn normalize_record_id(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyRecordId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Request body from `--data`, else from piped stdin.
pub fn resolve_payload(data: Option<&str>) -> Result<Value, CliError> {
    if let Some(raw) = data.and_then(|raw| normalize_text_option(Some(raw.to_string()))) {
        return parse_payload(&raw);
    }

    if let Some(raw) = read_piped_stdin()? {
        return parse_payload(&raw);
    }

    Err(CliError::EmptyPayload)
}

pub fn parse_payload(raw: &str) -> Result<Value, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyPayload);
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_text_option(Some(buffer)))
}

pub fn format_record_lines(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let short_id = record.id.chars().take(13).collect::<String>();
            let name = truncate(&record.display_name(), NAME_COLUMN_WIDTH);
            if record.is_active() {
                format!("{short_id:<13}  {name}")
            } else {
                format!(
                    "{short_id:<13}  {name:<width$}  (inactive)",
                    width = NAME_COLUMN_WIDTH
                )
            }
        })
        .collect()
}

pub fn record_to_list_item(record: &Record) -> RecordListItem {
    RecordListItem {
        id: record.id.clone(),
        name: record.display_name(),
        active: record.is_active(),
    }
}

/// `key: value` lines for every field, sorted by key.
pub fn format_record_detail(record: &Record) -> Vec<String> {
    let mut lines = vec![format!("id: {}", record.id)];
    let mut fields = record.fields.iter().collect::<Vec<_>>();
    fields.sort_by(|left, right| left.0.cmp(right.0));
    for (key, value) in fields {
        let rendered = match value {
            Value::String(text) => text.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        lines.push(format!("{key}: {rendered}"));
    }
    lines
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let mut truncated = collapsed
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_toast(toast: &Toast) -> String {
    let label = match toast.level {
        ToastLevel::Success => "ok",
        ToastLevel::Info => "info",
        ToastLevel::Error => "error",
    };
    format!("[{label}] {}", toast.message)
}

/// Prints queued toasts to stderr.
pub fn flush_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        eprintln!("{}", render_toast(&toast));
    }
}
