//! Campus Desktop Application
//!
//! A desktop dashboard for the school management API.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod queries;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, WindowBuilder};

const WINDOW_TITLE: &str = "Campus";

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus=debug,campus_core=debug")),
        )
        .init();

    tracing::info!("Starting Campus...");

    let config = Config::new().with_window(WindowBuilder::new().with_title(WINDOW_TITLE));

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
