//! Campus CLI - Command-line interface for the school management API
//!
//! Lists, creates, and restores school records, resolving deleted
//! duplicates the same way the desktop dashboard does.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::create::run_create;
use crate::commands::delete::run_delete;
use crate::commands::list::run_list;
use crate::commands::reactivate::run_reactivate;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus=info,campus_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::List {
            resource,
            page,
            all,
            json,
        }) => run_list(resource, page, all, json, profile).await?,
        Some(Commands::Create {
            resource,
            data,
            on_conflict,
            json,
        }) => run_create(resource, data.as_deref(), on_conflict, json, profile).await?,
        Some(Commands::Reactivate { resource, id }) => {
            run_reactivate(resource, &id, profile).await?;
        }
        Some(Commands::Show { resource, id, json }) => {
            run_show(resource, &id, json, profile).await?;
        }
        Some(Commands::Delete { resource, id }) => run_delete(resource, &id, profile).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, profile)?,
        Some(Commands::Auth { command }) => run_auth(command, profile)?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
