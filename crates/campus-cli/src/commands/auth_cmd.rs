use crate::auth::{mask_token, normalize_token, TokenStore};
use crate::cli::AuthCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;

    match command {
        AuthCommands::Login { profile, token } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            if config.profile(&profile_name).is_none() {
                return Err(CliError::Config(format!(
                    "Profile '{profile_name}' is not configured. Run `campus config init --profile {profile_name}` first."
                )));
            }

            let token = normalize_token(&token)?;
            TokenStore::new(&profile_name).save(&token)?;
            tracing::info!(profile = %profile_name, "Stored API token");
            println!("Stored token for profile '{profile_name}'");
            Ok(())
        }
        AuthCommands::Status { profile } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            match TokenStore::new(&profile_name).load()? {
                Some(token) => println!(
                    "Profile '{profile_name}' has a stored token ({})",
                    mask_token(&token)
                ),
                None => println!("Profile '{profile_name}' has no stored token."),
            }
            Ok(())
        }
        AuthCommands::Logout { profile } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            TokenStore::new(&profile_name).clear()?;
            println!("Removed token for profile '{profile_name}'");
            Ok(())
        }
    }
}
