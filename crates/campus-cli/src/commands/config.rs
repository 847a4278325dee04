use std::env;

use campus_core::config::{normalize_base_url, ENV_API_BASE_URL, ENV_ORGANIZATION_ID, ENV_ROLE};
use campus_core::session::Role;

use crate::auth::TokenStore;
use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            organization_id,
            role,
            timeout_secs,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            ProfileInput {
                api_base_url,
                organization_id,
                role,
                request_timeout_secs: timeout_secs,
            },
            no_activate,
        ),
        ConfigCommands::Show { profile } => run_config_show(profile.as_deref().or(global_profile)),
    }
}

/// Values given on the command line for `config init`.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub api_base_url: Option<String>,
    pub organization_id: Option<String>,
    pub role: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

pub fn run_config_init(
    profile_name: Option<&str>,
    input: ProfileInput,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged = merge_profile(input, &existing, |key| env::var(key).ok())?;
    *config.profile_mut_or_default(&profile_name) = merged;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Profile '{}' initialized at {}", profile_name, path.display());

    let missing = config
        .profile(&profile_name)
        .map(CliProfile::missing_fields)
        .unwrap_or_default();
    if missing.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `campus auth login --token <token>` to store an API token."
        );
    } else {
        println!("Profile '{}' is missing: {}", profile_name, missing.join(", "));
    }

    Ok(())
}

/// Explicit flags, then `CAMPUS_*` variables, then the stored profile.
pub fn merge_profile(
    input: ProfileInput,
    existing: &CliProfile,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CliProfile, CliError> {
    let api_base_url = normalize_text_option(input.api_base_url)
        .or_else(|| normalize_text_option(lookup(ENV_API_BASE_URL)))
        .or_else(|| existing.api_base_url.clone())
        .map(|url| normalize_base_url(&url))
        .transpose()?;
    let organization_id = normalize_text_option(input.organization_id)
        .or_else(|| normalize_text_option(lookup(ENV_ORGANIZATION_ID)))
        .or_else(|| existing.organization_id.clone());
    let role = normalize_text_option(input.role)
        .or_else(|| normalize_text_option(lookup(ENV_ROLE)))
        .or_else(|| existing.role.clone())
        .map(|raw| {
            raw.parse::<Role>()
                .map(|role| role.as_str().to_string())
                .map_err(|error| CliError::Config(error.to_string()))
        })
        .transpose()?;
    let request_timeout_secs = match input.request_timeout_secs {
        Some(0) => {
            return Err(CliError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ))
        }
        Some(secs) => Some(secs),
        None => existing.request_timeout_secs,
    };

    Ok(CliProfile {
        api_base_url,
        organization_id,
        role,
        request_timeout_secs,
    })
}

pub fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let active = config.active_profile.as_deref() == Some(profile_name.as_str());

    let Some(profile) = config.profile(&profile_name) else {
        println!("Profile '{profile_name}' is not configured.");
        return Ok(());
    };

    let token_stored = TokenStore::new(&profile_name).load()?.is_some();
    for line in format_profile(&profile_name, profile, active, token_stored) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_profile(
    name: &str,
    profile: &CliProfile,
    active: bool,
    token_stored: bool,
) -> Vec<String> {
    let unset = "(unset)";
    vec![
        format!("profile: {name}{}", if active { " (active)" } else { "" }),
        format!(
            "api_base_url: {}",
            profile.api_base_url.as_deref().unwrap_or(unset)
        ),
        format!(
            "organization_id: {}",
            profile.organization_id.as_deref().unwrap_or(unset)
        ),
        format!("role: {}", profile.role.as_deref().unwrap_or("admin")),
        format!(
            "request_timeout_secs: {}",
            profile
                .request_timeout_secs
                .map_or_else(|| unset.to_string(), |secs| secs.to_string())
        ),
        format!("token: {}", if token_stored { "stored" } else { "none" }),
    ]
}
